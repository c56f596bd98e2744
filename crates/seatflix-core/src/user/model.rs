//! User profile and authentication payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::{Identity, UserId};

/// Full user record as served by the backend.
///
/// Richer than `Identity`: views fetch it on demand by user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Server-relative avatar path, e.g. `/uploads/avatars/1/<uuid>.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<NaiveDate>,
}

impl UserProfile {
    /// Projects the profile onto the session identity.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Join date for display, `N/A` when unknown.
    pub fn date_joined_label(&self) -> String {
        self.date_joined
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

impl LoginResponse {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_json() {
        let json = r#"{
            "id": 7,
            "username": "alice",
            "email": "a@x.com",
            "profilePic": "/uploads/avatars/7/pic.png",
            "dateJoined": "2025-03-14",
            "enabled": true,
            "authorities": []
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id.as_str(), "7");
        assert_eq!(profile.profile_pic.as_deref(), Some("/uploads/avatars/7/pic.png"));
        assert_eq!(profile.date_joined_label(), "2025-03-14");
        assert_eq!(profile.identity(), Identity::new("7", "alice", "a@x.com"));
    }

    #[test]
    fn test_profile_without_optional_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":"u1","username":"bob","email":"b@x.com"}"#).unwrap();
        assert!(profile.profile_pic.is_none());
        assert_eq!(profile.date_joined_label(), "N/A");
    }

    #[test]
    fn test_login_response_without_token() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"message":"Login successful!","userId":3,"username":"c","email":"c@x.com"}"#,
        )
        .unwrap();
        assert!(response.token.is_none());
        assert_eq!(response.identity().user_id.as_str(), "3");
    }
}
