//! Registration, sign-in and sign-out.

use std::sync::Arc;

use seatflix_core::user::{LoginRequest, RegisterRequest};
use seatflix_core::{Identity, Result, SeatflixError, SessionStore};
use seatflix_interaction::UserApi;

pub const LOGIN_REJECTED: &str = "Invalid username or password.";
pub const LOGIN_UNAVAILABLE: &str = "An error occurred. Please try again later.";
pub const LOGIN_WITHOUT_TOKEN: &str = "Login failed. Please check your credentials.";

const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=50;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct AuthUseCase {
    api: UserApi,
    session: Arc<SessionStore>,
}

impl AuthUseCase {
    pub fn new(api: UserApi, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Creates an account. Returns the backend's confirmation message.
    ///
    /// Does not sign in; the caller routes to the login view.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<String> {
        validate_registration(username, email, password)?;

        let response = self
            .api
            .register(&RegisterRequest {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;

        tracing::info!(username = username.trim(), "[Auth] account registered");
        Ok(response
            .message
            .unwrap_or_else(|| "User registered successfully".to_string()))
    }

    /// Signs in and commits the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(SeatflixError::validation(
                "Username and password are required.",
            ));
        }

        let response = self
            .api
            .login(&LoginRequest {
                username: username.trim().to_string(),
                password: password.to_string(),
            })
            .await?;

        let token = response
            .token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SeatflixError::validation(LOGIN_WITHOUT_TOKEN))?;
        let identity = response.identity();

        self.session.login(token, identity.clone())?;
        tracing::info!(username = %identity.username, "[Auth] signed in");
        Ok(identity)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        tracing::info!("[Auth] signed out");
        Ok(())
    }

    /// Text the login view shows for a failed sign-in.
    pub fn login_error_message(err: &SeatflixError) -> String {
        match err {
            SeatflixError::Validation(message) => message.clone(),
            err if err.status() == Some(401) => LOGIN_REJECTED.to_string(),
            _ => LOGIN_UNAVAILABLE.to_string(),
        }
    }

    /// Text the registration view shows for a failed sign-up.
    pub fn register_error_message(err: &SeatflixError) -> String {
        match err {
            SeatflixError::Validation(message) => message.clone(),
            SeatflixError::Http { body, .. } if !body.trim().is_empty() => {
                format!("Registration failed: {}", body.trim())
            }
            _ => "Registration failed. Please try again.".to_string(),
        }
    }
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<()> {
    if !USERNAME_LEN.contains(&username.trim().chars().count()) {
        return Err(SeatflixError::validation(
            "Username must be between 3 and 50 characters",
        ));
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(SeatflixError::validation("Email must be valid"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SeatflixError::validation(
            "Password must be at least 6 characters long",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_rules() {
        assert!(validate_registration("al", "a@x.com", "secret").is_err());
        assert!(validate_registration(&"a".repeat(51), "a@x.com", "secret").is_err());
        assert!(validate_registration("alice", "alice.example.com", "secret").is_err());
        assert!(validate_registration("alice", "a@x.com", "12345").is_err());
        assert!(validate_registration("alice", "a@x.com", "123456").is_ok());
    }

    #[test]
    fn test_login_error_messages() {
        assert_eq!(
            AuthUseCase::login_error_message(&SeatflixError::Unauthorized),
            LOGIN_REJECTED
        );
        assert_eq!(
            AuthUseCase::login_error_message(&SeatflixError::Http {
                status: 401,
                body: "Invalid credentials".to_string()
            }),
            LOGIN_REJECTED
        );
        assert_eq!(
            AuthUseCase::login_error_message(&SeatflixError::network("refused")),
            LOGIN_UNAVAILABLE
        );
        assert_eq!(
            AuthUseCase::login_error_message(&SeatflixError::validation(LOGIN_WITHOUT_TOKEN)),
            LOGIN_WITHOUT_TOKEN
        );
    }

    #[test]
    fn test_register_error_message_uses_body() {
        let err = SeatflixError::Http {
            status: 400,
            body: "Username already exists".to_string(),
        };
        assert_eq!(
            AuthUseCase::register_error_message(&err),
            "Registration failed: Username already exists"
        );
        assert_eq!(
            AuthUseCase::register_error_message(&SeatflixError::network("down")),
            "Registration failed. Please try again."
        );
    }
}
