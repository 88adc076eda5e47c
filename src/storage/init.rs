//! Storage initialization
//!
//! Handles first-run setup: directories, an empty database document and
//! default settings.

use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::FinanceError;

use super::database::Database;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is safe.
pub fn initialize_storage(paths: &FinancePaths) -> Result<(), FinanceError> {
    paths.ensure_directories()?;

    if !paths.database_file().exists() {
        write_json_atomic(paths.database_file(), &Database::default())?;
        tracing::info!(path = %paths.database_file().display(), "created empty database");
    }

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    Ok(())
}
