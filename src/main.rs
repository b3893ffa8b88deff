use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use coa_ledger::cli::{
    handle_account_command, handle_amend_command, handle_delete_command, handle_find_command,
    handle_post_command, handle_report_command, handle_tree_command, run_shell, AccountCommands,
    AmendArgs, DeleteArgs, PostArgs, ReportArgs,
};
use coa_ledger::config::{LedgerPaths, Settings};
use coa_ledger::logging::init_tracing;
use coa_ledger::services::LedgerService;
use coa_ledger::storage::LedgerStore;

#[derive(Parser)]
#[command(
    name = "coa",
    version,
    about = "Terminal chart-of-accounts ledger",
    long_about = "coa keeps a chart of accounts whose hierarchy follows the account \
                  numbers: 1100 sits under 1000, 1110 under 1100. Postings cascade \
                  to every ancestor account."
)]
struct Cli {
    /// Account source file (defaults to the configured data directory)
    #[arg(short, long, global = true, env = "COA_LEDGER_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Post a transaction to an account
    Post(PostArgs),

    /// Delete a posting by index
    DeletePosting(DeleteArgs),

    /// Change the amount and direction of a posting
    AmendPosting(AmendArgs),

    /// Write a report for one account
    Report(ReportArgs),

    /// Show every account as a tree
    Tree,

    /// Look up one account
    Find {
        /// Account number
        number: String,
    },

    /// Start the interactive shell
    Shell,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if let Some(Commands::Config) = cli.command {
        let store = LedgerStore::from_settings(&paths, &settings, cli.file.as_deref());
        println!("coa-ledger Configuration");
        println!("========================");
        println!("Config directory:  {}", paths.base_dir().display());
        println!("Data directory:    {}", paths.data_dir().display());
        println!("Reports directory: {}", paths.reports_dir().display());
        println!("Account source:    {}", store.accounts_path().display());
        println!("Posting log:       {}", store.postings_path().display());
        println!();
        println!("Settings:");
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Date format:     {}", settings.date_format);
        println!("  Label width:     {}", settings.label_width);
        return Ok(());
    }

    paths.ensure_directories()?;
    let store = LedgerStore::from_settings(&paths, &settings, cli.file.as_deref());
    let mut service = LedgerService::open(store, settings, paths.reports_dir())?;

    match cli.command {
        Some(Commands::Account(cmd)) => handle_account_command(&mut service, cmd)?,
        Some(Commands::Post(args)) => handle_post_command(&mut service, args)?,
        Some(Commands::DeletePosting(args)) => handle_delete_command(&mut service, args)?,
        Some(Commands::AmendPosting(args)) => handle_amend_command(&mut service, args)?,
        Some(Commands::Report(args)) => handle_report_command(&mut service, args)?,
        Some(Commands::Tree) => handle_tree_command(&service)?,
        Some(Commands::Find { number }) => handle_find_command(&mut service, &number)?,
        Some(Commands::Shell) | None => {
            let stdin = io::stdin();
            run_shell(&mut service, stdin.lock(), io::stdout())?;
        }
        Some(Commands::Config) => {}
    }

    Ok(())
}
