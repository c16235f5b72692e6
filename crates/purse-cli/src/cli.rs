//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Purse - Track income, expenses and balances
#[derive(Parser)]
#[command(name = "purse")]
#[command(about = "Personal expense tracker with spending suggestions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "PURSE_DB", default_value = "purse.db", global = true)]
    pub db: PathBuf,

    /// User whose records are read and written
    #[arg(long, env = "PURSE_USER", default_value = "local", global = true)]
    pub user: String,

    /// Currency symbol used when printing amounts
    #[arg(long, env = "PURSE_CURRENCY", default_value = "₹", global = true)]
    pub currency: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show or change account and cash balances
    Balance {
        #[command(subcommand)]
        action: Option<BalanceAction>,
    },

    /// Record a transaction
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Show daily, monthly and yearly totals with top categories
    Stats {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate spending suggestions for the current month
    Suggest {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Start the suggestion API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Comma-separated list of allowed CORS origins (empty = any)
        #[arg(long, env = "PURSE_ALLOWED_ORIGINS", default_value = "")]
        allowed_origins: String,
    },
}

#[derive(Subcommand)]
pub enum BalanceAction {
    /// Show current balances (default)
    Show,

    /// Set starting balances (first time only)
    Setup {
        /// Bank account balance
        #[arg(long)]
        account: f64,

        /// Cash in hand
        #[arg(long)]
        cash: f64,
    },

    /// Overwrite existing balances
    Set {
        /// Bank account balance
        #[arg(long)]
        account: f64,

        /// Cash in hand
        #[arg(long)]
        cash: f64,
    },
}

#[derive(Subcommand)]
pub enum AddKind {
    /// Record money spent
    Expense(TransactionArgs),

    /// Record money received
    Income(TransactionArgs),
}

#[derive(Args)]
pub struct TransactionArgs {
    /// Amount (positive)
    pub amount: f64,

    /// Category, e.g. Food, Transport, Salary
    #[arg(short, long)]
    pub category: String,

    /// Payment method: account or cash
    #[arg(short, long, default_value = "account")]
    pub method: String,

    /// Free-text note
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Transaction date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}
