//! Stats and suggestion command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use purse_core::{
    build_report, db::Database, PeriodStats, StatsPeriod, SuggestionEngine, SuggestionInput,
};

use super::{money, truncate};

fn print_period(label: &str, stats: &PeriodStats, currency: &str) {
    println!(
        "   {:12} │ {:>14} │ {:>14} │ {:>14}",
        label,
        money(currency, stats.total_income),
        money(currency, stats.total_expense),
        money(currency, stats.net_balance)
    );
}

pub fn cmd_stats(
    db: &Database,
    user_id: &str,
    today: NaiveDate,
    currency: &str,
    json: bool,
) -> Result<()> {
    let report = build_report(db, user_id, today).context("Failed to build stats")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("📊 Statistics as of {}", report.as_of);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:12} │ {:>14} │ {:>14} │ {:>14}",
        "Period", "Income", "Expenses", "Net"
    );
    println!("   ─────────────┼────────────────┼────────────────┼───────────────");
    print_period(StatsPeriod::Today.as_str(), &report.daily, currency);
    print_period(StatsPeriod::ThisMonth.as_str(), &report.monthly, currency);
    print_period(StatsPeriod::ThisYear.as_str(), &report.yearly, currency);

    println!();
    println!("🏷️  Top Expense Categories (this month)");
    if report.category_breakdown.is_empty() {
        println!("   No expenses recorded this month.");
        return Ok(());
    }

    let month_total = report.monthly.total_expense;
    for (rank, entry) in report.category_breakdown.iter().enumerate() {
        let share = if month_total > 0.0 {
            entry.amount / month_total * 100.0
        } else {
            0.0
        };
        println!(
            "   {}. {:20} │ {:>14} │ {:>5.1}%",
            rank + 1,
            truncate(&entry.category, 20),
            money(currency, entry.amount),
            share
        );
    }

    Ok(())
}

pub fn cmd_suggest(
    db: &Database,
    user_id: &str,
    today: NaiveDate,
    engine: &SuggestionEngine,
) -> Result<()> {
    let report = build_report(db, user_id, today).context("Failed to build stats")?;
    let suggestions = engine.generate(&SuggestionInput::from_report(&report));

    println!();
    println!("🤖 Spending Suggestions ({})", today.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");
    for paragraph in suggestions.split("\n\n") {
        println!("   {}", paragraph);
        println!();
    }

    Ok(())
}
