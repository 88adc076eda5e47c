//! Storage layer for Bellam Finance
//!
//! The whole database lives in memory behind a lock and is rewritten to a
//! single JSON file after each mutation. Readers always see a complete
//! snapshot; writers in the same process are serialized by the lock.

pub mod database;
pub mod file_io;
pub mod init;

pub use database::{Database, Snapshot};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

/// Main storage coordinator over `database.json`
pub struct Storage {
    path: PathBuf,
    db: RwLock<Database>,
}

impl Storage {
    /// Open the database at the standard location, creating directories
    pub fn new(paths: &FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;
        Self::open(paths.database_file())
    }

    /// Open a database file; a missing file is an empty database
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FinanceError> {
        let path = path.into();
        let db: Database = read_json(&path)?;
        tracing::debug!(
            path = %path.display(),
            users = db.users.len(),
            members = db.family_members.len(),
            emis = db.emis.len(),
            expenses = db.daily_expenses.len(),
            "database loaded"
        );
        Ok(Self {
            path,
            db: RwLock::new(db),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against a consistent view of the database
    pub fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> Result<T, FinanceError> {
        let db = self
            .db
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(f(&*db))
    }

    /// Mutate the database and persist it.
    ///
    /// `f` works on a copy; the copy replaces the live database only after
    /// it has been written to disk, so a failed closure or a failed write
    /// leaves both memory and file unchanged.
    pub fn write<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, FinanceError>,
    ) -> Result<T, FinanceError> {
        let mut db = self
            .db
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut draft = db.clone();
        let value = f(&mut draft)?;
        write_json_atomic(&self.path, &draft)?;
        *db = draft;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FamilyMember, MemberId, MemberInput, Money, UserId};
    use tempfile::TempDir;

    fn member(raw: i64) -> FamilyMember {
        FamilyMember::new(
            MemberId::from_raw(raw),
            UserId::from_raw(1),
            MemberInput::new("Asha", Money::from_units(50000)),
        )
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.read(|db| db.users.len()).unwrap(), 0);
        // Nothing is written until the first mutation
        assert!(!paths.database_file().exists());
    }

    #[test]
    fn test_write_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("database.json");

        {
            let storage = Storage::open(&path).unwrap();
            storage
                .write(|db| {
                    db.family_members.push(member(1));
                    Ok(())
                })
                .unwrap();
        }

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.read(|db| db.family_members.len()).unwrap(), 1);
    }

    #[test]
    fn test_failed_write_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path().join("database.json")).unwrap();

        let result: Result<(), _> = storage.write(|db| {
            db.family_members.push(member(1));
            Err(FinanceError::Validation("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(storage.read(|db| db.family_members.len()).unwrap(), 0);
        assert!(!storage.path().exists());
    }
}
