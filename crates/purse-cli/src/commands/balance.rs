//! Balance command implementations

use anyhow::{Context, Result};
use purse_core::{db::Database, Error, UserBalance};

use super::money;

fn print_balance(balance: &UserBalance, currency: &str) {
    println!();
    println!("💰 Balances for {}", balance.user_id);
    println!("   ─────────────────────────────────────────");
    println!("   {:14} │ {:>14}", "Account", money(currency, balance.account_balance));
    println!("   {:14} │ {:>14}", "Cash in hand", money(currency, balance.cash_balance));
    println!("   ───────────────┼───────────────");
    println!("   {:14} │ {:>14}", "Total", money(currency, balance.total()));
    println!(
        "   Last updated {}",
        balance.updated_at.format("%Y-%m-%d %H:%M")
    );
}

pub fn cmd_balance_show(db: &Database, user_id: &str, currency: &str) -> Result<()> {
    match db.get_balance(user_id)? {
        Some(balance) => print_balance(&balance, currency),
        None => {
            println!("No balances set up for {}. Set them with:", user_id);
            println!("  purse balance setup --account 25000 --cash 1500");
        }
    }
    Ok(())
}

pub fn cmd_balance_setup(
    db: &Database,
    user_id: &str,
    account: f64,
    cash: f64,
    currency: &str,
) -> Result<()> {
    let balance = match db.setup_balance(user_id, account, cash) {
        Ok(balance) => balance,
        Err(Error::Conflict(_)) => {
            anyhow::bail!(
                "Balances for {} already exist. Use 'purse balance set' to change them.",
                user_id
            )
        }
        Err(e) => return Err(e).context("Failed to set up balances"),
    };

    println!("✅ Balances set up");
    print_balance(&balance, currency);
    Ok(())
}

pub fn cmd_balance_set(
    db: &Database,
    user_id: &str,
    account: f64,
    cash: f64,
    currency: &str,
) -> Result<()> {
    let balance = match db.update_balance(user_id, account, cash) {
        Ok(balance) => balance,
        Err(Error::NotFound(_)) => {
            anyhow::bail!(
                "No balances for {} yet. Use 'purse balance setup' first.",
                user_id
            )
        }
        Err(e) => return Err(e).context("Failed to update balances"),
    };

    println!("✅ Balances updated");
    print_balance(&balance, currency);
    Ok(())
}
