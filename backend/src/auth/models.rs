//! Data structures for authentication-related requests and responses.
//!
//! Request payloads carry `validator` rules that the auth service checks
//! before touching the credential store. Responses never include a password
//! or its digest.

use crate::database::models::User;
use crate::utils::jwt::Claims;
use crate::utils::password::MAX_PASSWORD_BYTES;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Company is required"))]
    pub company: String,
}

/// bcrypt digests at most `MAX_PASSWORD_BYTES`; `length` counts chars, not bytes.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message(Cow::Borrowed("Password must be at most 72 bytes")));
    }
    Ok(())
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing the access token and user info
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub company: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            company: user.company,
        }
    }
}

impl From<Claims> for UserInfo {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            name: claims.name,
            company: claims.company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(password: String) -> RegisterRequest {
        RegisterRequest {
            email: "a@x.com".to_string(),
            password,
            name: "A".to_string(),
            company: "Co".to_string(),
        }
    }

    #[test]
    fn test_password_byte_cap() {
        assert!(register_request("a".repeat(MAX_PASSWORD_BYTES)).validate().is_ok());
        assert!(register_request("a".repeat(MAX_PASSWORD_BYTES + 1)).validate().is_err());

        // 36 two-byte chars fill the limit exactly; one more goes over.
        assert!(register_request("é".repeat(36)).validate().is_ok());
        assert!(register_request("é".repeat(37)).validate().is_err());
    }
}
