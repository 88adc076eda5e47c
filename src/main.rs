use anyhow::Result;
use clap::{Parser, Subcommand};

use bellam::cli::{
    handle_emi_command, handle_expense_command, handle_member_command, handle_serve_command,
    handle_summary_command, handle_user_command, resolve_user, EmiCommands, ExpenseCommands,
    MemberCommands, ServeArgs, SummaryArgs, UserCommands,
};
use bellam::config::{FinancePaths, Settings};
use bellam::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bellam",
    version,
    about = "Family finance tracker: salaries, EMIs, daily expenses",
    long_about = "Bellam Finance tracks the salaries of family members, monthly EMIs \
                  and daily expenses, and grades each month by how much of the \
                  household income was saved. Run 'bellam serve' for the web app."
)]
struct Cli {
    /// Mobile number of the user to act for
    #[arg(short, long, global = true, env = "BELLAM_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, database and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Run the HTTP server
    Serve(ServeArgs),

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Family member commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// EMI commands
    #[command(subcommand)]
    Emi(EmiCommands),

    /// Daily expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show the monthly summary and grade
    Summary(SummaryArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Bellam Finance at: {}", paths.base_dir().display());
            bellam::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  bellam user add <username> <mobile>");
            println!("  bellam --user <mobile> member add <name> <salary>");
        }
        Some(Commands::Config) => {
            println!("Bellam Finance Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Database file:  {}", paths.database_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Listen address:  {}", settings.listen_addr);
            println!("  Static dir:      {}", settings.static_dir);
            println!("  Session TTL:     {} minutes", settings.session_ttl_minutes);
        }
        Some(Commands::Serve(args)) => {
            handle_serve_command(&paths, &settings, args)?;
        }
        Some(Commands::User(cmd)) => {
            let storage = Storage::new(&paths)?;
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Member(cmd)) => {
            let storage = Storage::new(&paths)?;
            let user = resolve_user(&storage, cli.user.as_deref())?;
            handle_member_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Emi(cmd)) => {
            let storage = Storage::new(&paths)?;
            let user = resolve_user(&storage, cli.user.as_deref())?;
            handle_emi_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let storage = Storage::new(&paths)?;
            let user = resolve_user(&storage, cli.user.as_deref())?;
            handle_expense_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Summary(args)) => {
            let storage = Storage::new(&paths)?;
            let user = resolve_user(&storage, cli.user.as_deref())?;
            handle_summary_command(&storage, &settings, &user, args)?;
        }
        None => {
            println!("Bellam Finance - family income and expense tracker");
            println!();
            println!("Run 'bellam --help' for usage information.");
            println!("Run 'bellam serve' to start the web app.");
        }
    }

    Ok(())
}
