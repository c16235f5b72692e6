//! Purse CLI - Personal expense tracker
//!
//! Usage:
//!   purse init                                  Initialize database
//!   purse balance setup --account N --cash N    Set starting balances
//!   purse add expense 250 --category Food       Record a transaction
//!   purse stats                                 Show period totals
//!   purse suggest                               Spending suggestions for this month
//!   purse serve --port 3000                     Start the suggestion API

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use purse_core::TransactionType;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    debug!(db = %cli.db.display(), user = %cli.user, "Parsed command line");

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Balance { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(BalanceAction::Show) => {
                    commands::cmd_balance_show(&db, &cli.user, &cli.currency)
                }
                Some(BalanceAction::Setup { account, cash }) => {
                    commands::cmd_balance_setup(&db, &cli.user, account, cash, &cli.currency)
                }
                Some(BalanceAction::Set { account, cash }) => {
                    commands::cmd_balance_set(&db, &cli.user, account, cash, &cli.currency)
                }
            }
        }
        Commands::Add { kind } => {
            let db = commands::open_db(&cli.db)?;
            let (transaction_type, args) = match kind {
                AddKind::Expense(args) => (TransactionType::Expense, args),
                AddKind::Income(args) => (TransactionType::Income, args),
            };
            let new_tx = commands::build_transaction(transaction_type, &args)?;
            commands::cmd_add(&db, &cli.user, &new_tx, &cli.currency)
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_transactions_list(&db, &cli.user, limit, &cli.currency)
        }
        Commands::Stats { date, json } => {
            let db = commands::open_db(&cli.db)?;
            let today = commands::resolve_date(date.as_deref())?;
            commands::cmd_stats(&db, &cli.user, today, &cli.currency, json)
        }
        Commands::Suggest { date } => {
            let db = commands::open_db(&cli.db)?;
            let today = commands::resolve_date(date.as_deref())?;
            let engine = purse_core::SuggestionEngine::new(cli.currency.as_str());
            commands::cmd_suggest(&db, &cli.user, today, &engine)
        }
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::cmd_serve(&host, port, &cli.currency, &allowed_origins).await,
    }
}
