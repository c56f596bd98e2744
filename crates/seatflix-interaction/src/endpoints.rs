//! SeatFlix backend routes, relative to the API base URL.

pub const REGISTER: &str = "/api/v1/users/register";
pub const LOGIN: &str = "/api/v1/users/login";
pub const UPLOAD_AVATAR: &str = "/api/v1/users/upload-avatar";
pub const USERS: &str = "/api/v1/users";
pub const CURRENT_USER: &str = "/api/v1/users/me";

/// Multipart field the avatar upload expects.
pub const AVATAR_FIELD: &str = "file";

pub fn user(id: &str) -> String {
    format!("{}/{}", USERS, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_path_is_encoded() {
        assert_eq!(user("42"), "/api/v1/users/42");
        assert_eq!(user("a b"), "/api/v1/users/a%20b");
    }
}
