//! Request bodies sent to the Toe Beans backend, plus the client-side
//! validation applied before anything goes on the wire.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Guest account baked into the login screen.
pub const GUEST_EMAIL: &str = "guestUser@example.com";
pub const GUEST_PASSWORD: &str = "Guest1234";

/// `POST /users/{name}`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

/// `PUT /users/{name}`. Empty strings mean "leave unchanged" on the
/// server side, matching the browser client.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserRequest {
    pub password: String,
    pub icon: String,
    pub self_introduction: String,
}

/// `PUT /password`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// `POST /postings`. `image` carries the base64-encoded file body.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostingRequest {
    pub title: String,
    pub image: String,
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Shape check only; the server owns real address validation.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validation applied to the registration form before submit.
pub fn validate_registration(
    user_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), String> {
    if user_name.is_empty() {
        return Err("User name is required".to_string());
    }
    if !is_valid_email(email) {
        return Err("Email address looks invalid".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("guestUser@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn test_registration_password_mismatch() {
        let err = validate_registration("alice", "a@b.co", "pw1", "pw2").unwrap_err();
        assert_eq!(err, "Passwords do not match");
    }

    #[test]
    fn test_registration_ok() {
        assert!(validate_registration("alice", "a@b.co", "pw", "pw").is_ok());
    }

    #[test]
    fn test_registration_requires_user_name() {
        assert!(validate_registration("", "a@b.co", "pw", "pw").is_err());
    }

    #[test]
    fn test_create_posting_serializes_image_field() {
        let req = CreatePostingRequest {
            title: "paw".to_string(),
            image: "aGVsbG8=".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["title"], "paw");
        assert_eq!(json["image"], "aGVsbG8=");
    }
}
