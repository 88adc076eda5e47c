//! User CLI commands

use clap::Subcommand;

use crate::display::format_user_list;
use crate::error::{FinanceError, FinanceResult};
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        /// Display name (at least 3 characters)
        username: String,
        /// 10-digit mobile number, used to log in
        mobile: String,
        /// Password; prompted for when omitted
        #[arg(long, env = "BELLAM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// List registered users
    List,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> FinanceResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add {
            username,
            mobile,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt_new_password()?,
            };

            let user = service.register(&username, &password, &mobile)?;
            println!("Registered user: {} ({})", user.username, user.mobile);
            println!("  ID: {}", user.id);
        }

        UserCommands::List => {
            println!("{}", format_user_list(&service.list()?));
        }
    }

    Ok(())
}

/// Prompt twice for a password (hidden input)
fn prompt_new_password() -> FinanceResult<String> {
    let first = prompt_password("Password: ")?;
    let second = prompt_password("Confirm password: ")?;
    if first != second {
        return Err(FinanceError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}

fn prompt_password(prompt: &str) -> FinanceResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| FinanceError::Io(format!("Failed to read password: {}", e)))
}
