//! Session domain models.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SeatflixError};

/// Backend user identifier.
///
/// The backend emits a numeric id while older persisted snapshots carry a
/// string, so both are accepted on input. Always serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Text(String),
    Number(i64),
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawUserId::deserialize(deserializer)? {
            RawUserId::Text(text) => Self(text),
            RawUserId::Number(number) => Self(number.to_string()),
        })
    }
}

/// Who the signed-in user is.
///
/// Persisted as JSON under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

impl Identity {
    pub fn new(
        user_id: impl Into<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Checks the shape beyond what serde enforces. Fails closed.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.is_empty() {
            return Err(SeatflixError::validation("identity is missing a user id"));
        }
        if self.username.trim().is_empty() {
            return Err(SeatflixError::validation("identity is missing a username"));
        }
        if !self.email.contains('@') {
            return Err(SeatflixError::validation(format!(
                "identity email '{}' is not an address",
                self.email
            )));
        }
        Ok(())
    }

    /// Parses and validates a persisted identity snapshot.
    pub fn from_json(raw: &str) -> Result<Self> {
        let identity: Identity = serde_json::from_str(raw)?;
        identity.validate()?;
        Ok(identity)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// In-memory authentication state. Owned exclusively by `SessionStore`.
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    identity: Option<Identity>,
    loading: bool,
}

impl Session {
    /// The state at process start: nothing known yet, restore pending.
    pub fn new() -> Self {
        Self {
            token: None,
            identity: None,
            loading: true,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True iff both a token and an identity are held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.identity.is_some()
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub(crate) fn authenticate(&mut self, token: String, identity: Identity) {
        self.token = Some(token);
        self.identity = Some(identity);
    }

    pub(crate) fn replace_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.identity = None;
        self.loading = false;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.loading,
            is_authenticated: self.is_authenticated(),
            identity: self.identity.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the session published to consumers.
///
/// Never carries the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub loading: bool,
    pub is_authenticated: bool,
    pub identity: Option<Identity>,
}

impl SessionSnapshot {
    /// Snapshot of a session whose restore has not run yet.
    pub fn loading() -> Self {
        Session::new().snapshot()
    }

    /// Snapshot of a restored, signed-out session.
    pub fn signed_out() -> Self {
        Self {
            loading: false,
            is_authenticated: false,
            identity: None,
        }
    }

    /// Snapshot of a restored, signed-in session.
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            loading: false,
            is_authenticated: true,
            identity: Some(identity),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_json_is_camel_case() {
        let identity = Identity::new("u1", "alice", "a@x.com");
        let json = identity.to_json().unwrap();
        assert_eq!(json, r#"{"userId":"u1","username":"alice","email":"a@x.com"}"#);
    }

    #[test]
    fn test_numeric_user_id_is_accepted() {
        let identity =
            Identity::from_json(r#"{"userId":42,"username":"bob","email":"b@x.com"}"#).unwrap();
        assert_eq!(identity.user_id.as_str(), "42");
    }

    #[test]
    fn test_identity_missing_field_is_rejected() {
        let result = Identity::from_json(r#"{"userId":"u1","username":"alice"}"#);
        assert!(result.unwrap_err().is_serialization());
    }

    #[test]
    fn test_identity_validation_fails_closed() {
        assert!(Identity::new("", "alice", "a@x.com").validate().is_err());
        assert!(Identity::new("u1", " ", "a@x.com").validate().is_err());
        assert!(Identity::new("u1", "alice", "not-an-email").validate().is_err());
        assert!(Identity::new("u1", "alice", "a@x.com").validate().is_ok());
    }

    #[test]
    fn test_new_session_is_loading_and_unauthenticated() {
        let session = Session::new();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(session.snapshot(), SessionSnapshot::loading());
    }

    #[test]
    fn test_identity_alone_is_not_authenticated() {
        let mut session = Session::new();
        session.replace_identity(Identity::new("u1", "alice", "a@x.com"));
        assert!(!session.is_authenticated());
    }
}
