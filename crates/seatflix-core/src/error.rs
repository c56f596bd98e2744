//! Error types for the SeatFlix client.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire SeatFlix client.
///
/// Variants are split along the lines the views care about: session expiry
/// (`Unauthorized`) is distinct from a server-side failure (`Http`) and from
/// no response at all (`Network`).
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq)]
pub enum SeatflixError {
    /// A required record is absent, locally or on the backend.
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    /// Durable storage read/write failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A payload or file could not be encoded or decoded.
    #[error("Malformed {format}: {message}")]
    Serialization { format: String, message: String },

    /// Input rejected before reaching the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or unusable client settings.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The backend answered 401. Persisted session keys are already cleared
    /// by the time a caller sees this.
    #[error("Session expired or credentials rejected")]
    Unauthorized,

    /// Any other non-success status, passed through untouched.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// No response was received (connect failure, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),
}

impl SeatflixError {
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// `format` names the encoding, e.g. "JSON" or "TOML".
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for the session-expiry signal.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns the HTTP status carried by this error, if any.
    ///
    /// `Unauthorized` reports 401 so views can branch on the status alone.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SeatflixError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("{:?}: {}", err.kind(), err))
    }
}

impl From<serde_json::Error> for SeatflixError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err.to_string())
    }
}

/// A type alias for `Result<T, SeatflixError>`.
pub type Result<T> = std::result::Result<T, SeatflixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SeatflixError::Unauthorized.status(), Some(401));
        let err = SeatflixError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(SeatflixError::network("timeout").status(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SeatflixError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }
}
