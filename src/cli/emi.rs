//! EMI CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::format_emi_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{EmiId, EmiInput, Period, User};
use crate::services::{EmiService, PeriodService};
use crate::storage::Storage;

/// EMI subcommands
#[derive(Subcommand)]
pub enum EmiCommands {
    /// Record an EMI for a month
    Add {
        /// What the installment is for
        item: String,
        /// Installment amount
        amount: String,
        /// Month it counts in (default: current month)
        #[arg(short, long)]
        period: Option<String>,
        /// First month of the loan tenure
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Last month of the loan tenure
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
    /// List EMIs
    List {
        /// Only this month
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Replace an EMI's item, amount and month
    Edit {
        /// EMI ID
        id: i64,
        /// New item name
        item: String,
        /// New amount
        amount: String,
        /// New month (default: unchanged)
        #[arg(short, long)]
        period: Option<String>,
        /// New tenure start (default: unchanged)
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// New tenure end (default: unchanged)
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// Drop the stored tenure
        #[arg(long, conflicts_with_all = ["start", "end"])]
        clear_tenure: bool,
    },
    /// Remove an EMI
    Remove {
        /// EMI ID
        id: i64,
    },
}

fn parse_tenure(
    periods: &PeriodService,
    start: Option<&str>,
    end: Option<&str>,
) -> FinanceResult<Option<(Period, Period)>> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some((periods.parse(start)?, periods.parse(end)?))),
        (None, None) => Ok(None),
        _ => Err(FinanceError::Validation(
            "Tenure needs both --start and --end".into(),
        )),
    }
}

/// Handle an EMI command for `user`
pub fn handle_emi_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: EmiCommands,
) -> FinanceResult<()> {
    let service = EmiService::new(storage);
    let periods = PeriodService::new();
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        EmiCommands::Add {
            item,
            amount,
            period,
            start,
            end,
        } => {
            let period = periods.parse_or_current(period.as_deref())?;
            let mut input = EmiInput::new(item, parse_amount(&amount)?, period);
            if let Some((start, end)) = parse_tenure(&periods, start.as_deref(), end.as_deref())? {
                input = input.with_tenure(start, end);
            }

            let emi = service.create(user.id, input)?;
            println!(
                "Added EMI: {} {} for {}",
                emi.item_name,
                emi.amount.format_with_symbol(symbol),
                emi.period()
            );
            println!("  ID: {}", emi.id);
        }

        EmiCommands::List { period } => {
            let emis = match period {
                Some(p) => service.for_period(user.id, periods.parse(&p)?)?,
                None => service.list(user.id)?,
            };
            println!("{}", format_emi_list(&emis, symbol));
        }

        EmiCommands::Edit {
            id,
            item,
            amount,
            period,
            start,
            end,
            clear_tenure,
        } => {
            let id = EmiId::from_raw(id);
            let existing = service
                .get(user.id, id)?
                .ok_or_else(|| FinanceError::emi_not_found(id.to_string()))?;

            let period = match period {
                Some(p) => periods.parse(&p)?,
                None => existing.period(),
            };
            let tenure = if clear_tenure {
                None
            } else {
                parse_tenure(&periods, start.as_deref(), end.as_deref())?
                    .or_else(|| existing.tenure())
            };

            let mut input = EmiInput::new(item, parse_amount(&amount)?, period);
            if let Some((start, end)) = tenure {
                input = input.with_tenure(start, end);
            }

            let emi = service.update(user.id, id, input)?;
            println!(
                "Updated EMI {}: {} {} for {}",
                emi.id,
                emi.item_name,
                emi.amount.format_with_symbol(symbol),
                emi.period()
            );
        }

        EmiCommands::Remove { id } => {
            let id = EmiId::from_raw(id);
            match service.get(user.id, id)? {
                Some(emi) => {
                    service.delete(user.id, id)?;
                    println!("Removed EMI: {} ({})", emi.item_name, emi.period());
                }
                None => println!("No EMI with ID {}; nothing removed.", id),
            }
        }
    }

    Ok(())
}
