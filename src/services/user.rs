//! User service
//!
//! Registration and credential checks. Users are identified by their mobile
//! number; the password is only ever stored as an argon2 hash.

use crate::crypto::{hash_password, verify_password};
use crate::error::{FinanceError, FinanceResult};
use crate::models::user::validate_registration;
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user accounts
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    ///
    /// Username and mobile are trimmed; the password is taken as given.
    pub fn register(&self, username: &str, password: &str, mobile: &str) -> FinanceResult<User> {
        let username = username.trim();
        let mobile = mobile.trim();

        validate_registration(username, password, mobile)
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        // Cheap check first so a taken number doesn't pay for a hash
        if self.find_by_mobile(mobile)?.is_some() {
            return Err(duplicate_mobile(mobile));
        }

        let password_hash = hash_password(password)?;

        let user = self.storage.write(|db| {
            if db.users.iter().any(|u| u.mobile == mobile) {
                return Err(duplicate_mobile(mobile));
            }
            let user = User::new(
                db.next_user_id()?,
                username.to_string(),
                mobile.to_string(),
                password_hash,
            );
            db.users.push(user.clone());
            Ok(user)
        })?;

        tracing::info!(user = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Check a mobile/password pair
    ///
    /// Unknown numbers, wrong passwords and stored hashes that are not
    /// argon2 (such as bcrypt hashes from older databases) all produce the
    /// same error.
    pub fn authenticate(&self, mobile: &str, password: &str) -> FinanceResult<User> {
        let Some(user) = self.find_by_mobile(mobile.trim())? else {
            tracing::warn!("login rejected: unknown mobile");
            return Err(FinanceError::InvalidCredentials);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => {
                tracing::warn!(user = %user.id, "login rejected: wrong password");
                Err(FinanceError::InvalidCredentials)
            }
            Err(e) => {
                tracing::warn!(
                    user = %user.id,
                    error = %e,
                    "login rejected: unusable password hash"
                );
                Err(FinanceError::InvalidCredentials)
            }
        }
    }

    /// Look up a user by mobile number
    pub fn find_by_mobile(&self, mobile: &str) -> FinanceResult<Option<User>> {
        self.storage
            .read(|db| db.users.iter().find(|u| u.mobile == mobile).cloned())
    }

    /// Look up a user by ID
    pub fn get(&self, id: UserId) -> FinanceResult<Option<User>> {
        self.storage
            .read(|db| db.users.iter().find(|u| u.id == id).cloned())
    }

    /// All registered users
    pub fn list(&self) -> FinanceResult<Vec<User>> {
        self.storage.read(|db| db.users.clone())
    }
}

fn duplicate_mobile(mobile: &str) -> FinanceError {
    FinanceError::Duplicate {
        entity_type: "Mobile number",
        identifier: mobile.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path().join("database.json")).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_register_and_authenticate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let user = service.register("asha", "secret1", "9876543210").unwrap();
        assert_ne!(user.password_hash, "secret1");

        let authed = service.authenticate("9876543210", "secret1").unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[test]
    fn test_wrong_password_and_unknown_mobile_look_the_same() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.register("asha", "secret1", "9876543210").unwrap();

        let wrong = service.authenticate("9876543210", "nope!!").unwrap_err();
        let unknown = service.authenticate("1111111111", "secret1").unwrap_err();

        assert!(matches!(wrong, FinanceError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn test_legacy_bcrypt_hash_is_rejected_as_bad_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("database.json");
        std::fs::write(
            &path,
            r#"{
                "users": [{
                    "id": 1735689600000,
                    "username": "asha",
                    "mobile": "9876543210",
                    "password": "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy",
                    "createdAt": "2025-01-01T00:00:00.000Z"
                }],
                "familyMembers": [],
                "emis": [],
                "dailyExpenses": []
            }"#,
        )
        .unwrap();
        let storage = Storage::open(&path).unwrap();
        let service = UserService::new(&storage);

        for password in ["wrongpw", "secret1"] {
            let err = service.authenticate("9876543210", password).unwrap_err();
            assert!(matches!(err, FinanceError::InvalidCredentials));
        }
        assert!(service.find_by_mobile("9876543210").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_mobile() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.register("asha", "secret1", "9876543210").unwrap();

        let err = service
            .register("ravi", "secret2", "9876543210")
            .unwrap_err();
        assert!(matches!(err, FinanceError::Duplicate { .. }));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_registration_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        for (username, password, mobile) in [
            ("", "secret1", "9876543210"),
            ("as", "secret1", "9876543210"),
            ("asha", "12345", "9876543210"),
            ("asha", "secret1", "98765"),
        ] {
            let err = service.register(username, password, mobile).unwrap_err();
            assert!(err.is_validation(), "{:?} accepted", (username, password, mobile));
        }
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_password_hash_not_plaintext_on_disk() {
        let (temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.register("asha", "secret1", "9876543210").unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("database.json")).unwrap();
        assert!(!raw.contains("\"secret1\""));
        assert!(raw.contains("$argon2"));
    }
}
