//! User account model
//!
//! Users log in with their mobile number. Only the argon2 hash of the
//! password is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Minimum username length
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Required number of digits in a mobile number
pub const MOBILE_DIGITS: usize = 10;

/// Validation errors for registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    MissingFields,
    UsernameTooShort,
    PasswordTooShort,
    InvalidMobile,
}

impl std::fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => {
                write!(f, "Username, password, and mobile number are required")
            }
            Self::UsernameTooShort => write!(
                f,
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            ),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ),
            Self::InvalidMobile => write!(
                f,
                "Mobile number must be exactly {} digits",
                MOBILE_DIGITS
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub mobile: String,
    /// PHC-format password hash
    #[serde(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, username: String, mobile: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            mobile,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Check a mobile number: exactly ten ASCII digits
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == MOBILE_DIGITS && mobile.chars().all(|c| c.is_ascii_digit())
}

/// Validate registration fields
pub fn validate_registration(
    username: &str,
    password: &str,
    mobile: &str,
) -> Result<(), UserValidationError> {
    if username.is_empty() || password.is_empty() || mobile.is_empty() {
        return Err(UserValidationError::MissingFields);
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(UserValidationError::UsernameTooShort);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserValidationError::PasswordTooShort);
    }
    if !is_valid_mobile(mobile) {
        return Err(UserValidationError::InvalidMobile);
    }
    Ok(())
}
