//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `balance` - Balance commands (show, setup, set)
//! - `core` - Core commands (init) and shared utilities (open_db, resolve_date)
//! - `reports` - Stats and suggestion commands
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (add, list)

pub mod balance;
pub mod core;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use balance::*;
pub use core::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount with the configured currency symbol
pub fn money(currency: &str, amount: f64) -> String {
    format!("{}{:.2}", currency, amount)
}
