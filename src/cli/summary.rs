//! Summary CLI command

use clap::Args;

use crate::config::Settings;
use crate::error::FinanceResult;
use crate::models::User;
use crate::reports::FinancialSummary;
use crate::services::PeriodService;
use crate::storage::Storage;

/// Arguments for `summary`
#[derive(Args)]
pub struct SummaryArgs {
    /// Month to summarize (default: current month)
    #[arg(short, long)]
    pub period: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Print the monthly summary for `user`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    args: SummaryArgs,
) -> FinanceResult<()> {
    let period = PeriodService::new().parse_or_current(args.period.as_deref())?;
    let summary = FinancialSummary::generate(storage, user.id, period)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
