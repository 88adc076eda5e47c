//! Daily expense CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ExpenseId, ExpenseInput, User};
use crate::services::{ExpenseService, PeriodService};
use crate::storage::Storage;

/// Daily expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Product or service bought
        product: String,
        /// Price paid
        price: String,
        /// Month it counts in (default: current month)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// List expenses
    List {
        /// Only this month
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Replace an expense's product, price and month
    Edit {
        /// Expense ID
        id: i64,
        /// New product name
        product: String,
        /// New price
        price: String,
        /// New month (default: unchanged)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Remove an expense
    Remove {
        /// Expense ID
        id: i64,
    },
}

/// Handle an expense command for `user`
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ExpenseCommands,
) -> FinanceResult<()> {
    let service = ExpenseService::new(storage);
    let periods = PeriodService::new();
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            product,
            price,
            period,
        } => {
            let period = periods.parse_or_current(period.as_deref())?;
            let expense = service.create(
                user.id,
                ExpenseInput::new(product, parse_amount(&price)?, period),
            )?;
            println!(
                "Added expense: {} {} for {}",
                expense.product_name,
                expense.price.format_with_symbol(symbol),
                expense.period()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { period } => {
            let expenses = match period {
                Some(p) => service.for_period(user.id, periods.parse(&p)?)?,
                None => service.list(user.id)?,
            };
            println!("{}", format_expense_list(&expenses, symbol));
        }

        ExpenseCommands::Edit {
            id,
            product,
            price,
            period,
        } => {
            let id = ExpenseId::from_raw(id);
            let existing = service
                .get(user.id, id)?
                .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
            let period = match period {
                Some(p) => periods.parse(&p)?,
                None => existing.period(),
            };

            let expense = service.update(
                user.id,
                id,
                ExpenseInput::new(product, parse_amount(&price)?, period),
            )?;
            println!(
                "Updated expense {}: {} {} for {}",
                expense.id,
                expense.product_name,
                expense.price.format_with_symbol(symbol),
                expense.period()
            );
        }

        ExpenseCommands::Remove { id } => {
            let id = ExpenseId::from_raw(id);
            match service.get(user.id, id)? {
                Some(expense) => {
                    service.delete(user.id, id)?;
                    println!(
                        "Removed expense: {} ({})",
                        expense.product_name,
                        expense.period()
                    );
                }
                None => println!("No expense with ID {}; nothing removed.", id),
            }
        }
    }

    Ok(())
}
