//! Purse Core Library
//!
//! Shared functionality for the Purse expense tracker:
//! - Transaction and balance models
//! - Period statistics and category breakdowns
//! - Rule-based spending suggestions
//! - Validation of suggestion requests arriving over the wire
//! - SQLite storage for transactions and user balances

pub mod db;
pub mod error;
pub mod models;
pub mod stats;
pub mod suggestions;

pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    validate_balances, CategoryAmount, NewTransaction, PaymentMethod, PeriodStats, Transaction,
    TransactionType, UserBalance,
};
pub use stats::{
    build_report, compute_category_breakdown, compute_stats, StatsPeriod, StatsReport,
    TOP_CATEGORY_LIMIT,
};
pub use suggestions::{
    generate_suggestions, SuggestionEngine, SuggestionInput, SuggestionRequest,
    SuggestionResponse,
};
