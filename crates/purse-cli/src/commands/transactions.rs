//! Transaction command implementations

use anyhow::{Context, Result};
use purse_core::{db::Database, NewTransaction, PaymentMethod, TransactionType};

use super::{money, resolve_date, truncate};
use crate::cli::TransactionArgs;

/// Turn `add` arguments into an insertable transaction
pub fn build_transaction(
    transaction_type: TransactionType,
    args: &TransactionArgs,
) -> Result<NewTransaction> {
    let payment_method: PaymentMethod = args
        .method
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (use account or cash)", e))?;

    Ok(NewTransaction {
        amount: args.amount,
        transaction_type,
        category: args.category.clone(),
        payment_method,
        description: args.description.clone(),
        transaction_date: resolve_date(args.date.as_deref())?,
    })
}

pub fn cmd_add(db: &Database, user_id: &str, new_tx: &NewTransaction, currency: &str) -> Result<()> {
    let tx = db
        .insert_transaction(user_id, new_tx)
        .context("Failed to record transaction")?;

    let verb = match tx.transaction_type {
        TransactionType::Expense => "expense",
        TransactionType::Income => "income",
    };
    println!(
        "✅ Recorded {} #{}: {} {} ({}) on {}",
        verb,
        tx.id,
        money(currency, tx.amount),
        tx.category,
        tx.payment_method,
        tx.transaction_date
    );

    if let Some(balance) = db.get_balance(user_id)? {
        println!(
            "   Balance now {} (account {}, cash {})",
            money(currency, balance.total()),
            money(currency, balance.account_balance),
            money(currency, balance.cash_balance)
        );
    }

    Ok(())
}

/// Signed amount padded to a fixed column width, then colored.
///
/// Padding goes inside the escape codes so the width counts only visible characters.
pub fn colored_amount(transaction_type: TransactionType, amount: f64, currency: &str) -> String {
    let (sign, color) = match transaction_type {
        TransactionType::Expense => ('-', 31), // Red for expenses
        TransactionType::Income => ('+', 32),  // Green for income
    };
    let padded = format!("{:>12}", format!("{}{}", sign, money(currency, amount)));
    format!("\x1b[{}m{}\x1b[0m", color, padded)
}

pub fn cmd_transactions_list(db: &Database, user_id: &str, limit: i64, currency: &str) -> Result<()> {
    let transactions = db.list_transactions(user_id, limit)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  purse add expense 250 --category Food");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = colored_amount(tx.transaction_type, tx.amount, currency);

        let label = if tx.description.is_empty() {
            tx.category.clone()
        } else {
            format!("{} - {}", tx.category, tx.description)
        };

        println!(
            "   {} │ {} │ {:7} │ {}",
            tx.transaction_date,
            amount_str,
            tx.payment_method.as_str(),
            truncate(&label, 40)
        );
    }

    Ok(())
}
