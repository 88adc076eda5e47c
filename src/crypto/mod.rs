//! Password hashing for user accounts
//!
//! Argon2id with a random per-password salt; hashes are stored in PHC
//! string format so parameters travel with the hash.

pub mod password;

pub use password::{hash_password, verify_password};
