//! Family member CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::format_member_list;
use crate::error::FinanceResult;
use crate::models::{MemberId, MemberInput, User};
use crate::services::MemberService;
use crate::storage::Storage;

/// Family member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a family member
    Add {
        /// Member name
        name: String,
        /// Monthly salary (e.g. "50000" or "49,999.50")
        salary: String,
    },
    /// List family members
    List,
    /// Replace a member's name and salary
    Edit {
        /// Member ID
        id: i64,
        /// New name
        name: String,
        /// New monthly salary
        salary: String,
    },
    /// Remove a family member
    Remove {
        /// Member ID
        id: i64,
    },
}

/// Handle a member command for `user`
pub fn handle_member_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: MemberCommands,
) -> FinanceResult<()> {
    let service = MemberService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MemberCommands::Add { name, salary } => {
            let member = service.create(user.id, MemberInput::new(name, parse_amount(&salary)?))?;
            println!(
                "Added member: {} ({})",
                member.name,
                member.salary.format_with_symbol(symbol)
            );
            println!("  ID: {}", member.id);
        }

        MemberCommands::List => {
            println!("{}", format_member_list(&service.list(user.id)?, symbol));
        }

        MemberCommands::Edit { id, name, salary } => {
            let member = service.update(
                user.id,
                MemberId::from_raw(id),
                MemberInput::new(name, parse_amount(&salary)?),
            )?;
            println!(
                "Updated member {}: {} ({})",
                member.id,
                member.name,
                member.salary.format_with_symbol(symbol)
            );
        }

        MemberCommands::Remove { id } => {
            let id = MemberId::from_raw(id);
            match service.get(user.id, id)? {
                Some(member) => {
                    service.delete(user.id, id)?;
                    println!("Removed member: {}", member.name);
                }
                None => println!("No member with ID {}; nothing removed.", id),
            }
        }
    }

    Ok(())
}
