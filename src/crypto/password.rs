//! Argon2id password hashing and verification

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::error::{FinanceError, FinanceResult};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> FinanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FinanceError::PasswordHash(format!("Hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a candidate password against a stored PHC hash
///
/// Returns `Ok(false)` for a wrong password and an error only when the
/// stored hash itself is unusable.
pub fn verify_password(candidate: &str, stored_hash: &str) -> FinanceResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| FinanceError::PasswordHash(format!("Invalid stored hash: {}", e)))?;

    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(other) => Err(FinanceError::PasswordHash(format!(
            "Verification failed: {}",
            other
        ))),
    }
}
