//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod emi;
pub mod expense;
pub mod member;
pub mod serve;
pub mod summary;
pub mod user;

pub use emi::{handle_emi_command, EmiCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use member::{handle_member_command, MemberCommands};
pub use serve::{handle_serve_command, ServeArgs};
pub use summary::{handle_summary_command, SummaryArgs};
pub use user::{handle_user_command, UserCommands};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, User};
use crate::services::UserService;
use crate::storage::Storage;

/// Environment variable naming the acting user's mobile number
pub const USER_ENV: &str = "BELLAM_USER";

/// Find the user record commands act for
pub fn resolve_user(storage: &Storage, mobile: Option<&str>) -> FinanceResult<User> {
    let mobile = mobile.map(str::trim).filter(|m| !m.is_empty()).ok_or_else(|| {
        FinanceError::Validation(format!(
            "No user selected; pass --user <mobile> or set {}",
            USER_ENV
        ))
    })?;

    UserService::new(storage)
        .find_by_mobile(mobile)?
        .ok_or_else(|| FinanceError::user_not_found(mobile))
}

/// Parse a money argument like "1,200.50" or "₹499"
pub(crate) fn parse_amount(s: &str) -> FinanceResult<Money> {
    Money::parse(s).map_err(|e| FinanceError::Validation(format!("Invalid amount '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_user() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path().join("database.json")).unwrap();
        let user = UserService::new(&storage)
            .register("asha", "secret1", "9876543210")
            .unwrap();

        assert_eq!(
            resolve_user(&storage, Some(" 9876543210 ")).unwrap().id,
            user.id
        );
        assert!(resolve_user(&storage, Some("1111111111"))
            .unwrap_err()
            .is_not_found());
        assert!(resolve_user(&storage, None).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,200.50").unwrap(), Money::from_cents(120_050));
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }
}
