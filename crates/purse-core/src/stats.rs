//! Period statistics and category breakdowns
//!
//! Pure reductions over transaction slices. The windows themselves are
//! chosen by the caller (see [`StatsPeriod`] and [`build_report`]).

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::Database;
use crate::error::Result;
use crate::models::{CategoryAmount, PeriodStats, Transaction, TransactionType};

/// Maximum number of categories returned by [`compute_category_breakdown`]
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Sum expenses and income over `transactions`.
///
/// Amounts are not validated here; an empty slice yields all zeros.
pub fn compute_stats(transactions: &[Transaction]) -> PeriodStats {
    let mut total_expense = 0.0;
    let mut total_income = 0.0;

    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Expense => total_expense += tx.amount,
            TransactionType::Income => total_income += tx.amount,
        }
    }

    PeriodStats {
        total_expense,
        total_income,
        net_balance: total_income - total_expense,
    }
}

/// Rank categories by summed amount, highest first, keeping the top five.
///
/// The caller is expected to pass expense transactions only. Categories are
/// matched exactly (case-sensitive). Equal totals keep first-seen order.
pub fn compute_category_breakdown(transactions: &[Transaction]) -> Vec<CategoryAmount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryAmount> = Vec::new();

    for tx in transactions {
        match index.get(tx.category.as_str()) {
            Some(&i) => groups[i].amount += tx.amount,
            None => {
                index.insert(tx.category.as_str(), groups.len());
                groups.push(CategoryAmount::new(tx.category.clone(), tx.amount));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order.
    // total_cmp keeps the order total even if a NaN amount slips through.
    groups.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    groups.truncate(TOP_CATEGORY_LIMIT);
    groups
}

/// Named stats windows, each running from its start date onwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsPeriod {
    Today,
    ThisMonth,
    ThisYear,
}

impl StatsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisMonth => "this-month",
            Self::ThisYear => "this-year",
        }
    }

    /// First date included in the window, relative to `today`
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::ThisMonth => today.with_day(1).unwrap_or(today),
            Self::ThisYear => today.with_ordinal(1).unwrap_or(today),
        }
    }
}

impl std::str::FromStr for StatsPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "daily" => Ok(Self::Today),
            "this-month" | "monthly" => Ok(Self::ThisMonth),
            "this-year" | "yearly" => Ok(Self::ThisYear),
            _ => Err(format!(
                "Unknown period: {}. Available: today, this-month, this-year",
                s
            )),
        }
    }
}

impl std::fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Daily, monthly and yearly stats plus this month's top expense categories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub as_of: NaiveDate,
    pub daily: PeriodStats,
    pub monthly: PeriodStats,
    pub yearly: PeriodStats,
    pub category_breakdown: Vec<CategoryAmount>,
}

/// Load a user's transactions for each window and reduce them
pub fn build_report(db: &Database, user_id: &str, today: NaiveDate) -> Result<StatsReport> {
    let window = |period: StatsPeriod| -> Result<PeriodStats> {
        let txs = db.transactions_since(user_id, period.start_date(today), None)?;
        Ok(compute_stats(&txs))
    };

    let daily = window(StatsPeriod::Today)?;
    let monthly = window(StatsPeriod::ThisMonth)?;
    let yearly = window(StatsPeriod::ThisYear)?;

    let month_expenses = db.transactions_since(
        user_id,
        StatsPeriod::ThisMonth.start_date(today),
        Some(TransactionType::Expense),
    )?;
    let category_breakdown = compute_category_breakdown(&month_expenses);

    debug!(
        user = user_id,
        %today,
        categories = category_breakdown.len(),
        "Built stats report"
    );

    Ok(StatsReport {
        as_of: today,
        daily,
        monthly,
        yearly,
        category_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::Utc;

    fn tx(transaction_type: TransactionType, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            user_id: "user-1".to_string(),
            amount,
            transaction_type,
            category: category.to_string(),
            payment_method: PaymentMethod::Account,
            description: String::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expense(category: &str, amount: f64) -> Transaction {
        tx(TransactionType::Expense, category, amount)
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, PeriodStats::default());
        assert_eq!(stats.net_balance, 0.0);
    }

    #[test]
    fn test_compute_stats_sums_by_type() {
        let txs = vec![
            expense("Food", 120.0),
            tx(TransactionType::Income, "Salary", 5000.0),
            expense("Transport", 80.5),
            tx(TransactionType::Income, "Gift", 250.0),
        ];

        let stats = compute_stats(&txs);
        assert_eq!(stats.total_expense, 200.5);
        assert_eq!(stats.total_income, 5250.0);
        assert_eq!(stats.net_balance, stats.total_income - stats.total_expense);
    }

    #[test]
    fn test_compute_stats_net_can_be_negative() {
        let txs = vec![
            tx(TransactionType::Income, "Salary", 100.0),
            expense("Rent", 400.0),
        ];
        assert_eq!(compute_stats(&txs).net_balance, -300.0);
    }

    #[test]
    fn test_breakdown_empty() {
        assert!(compute_category_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_breakdown_groups_and_sorts_descending() {
        let txs = vec![
            expense("Food", 100.0),
            expense("Transport", 300.0),
            expense("Food", 250.0),
            expense("Bills", 50.0),
        ];

        let breakdown = compute_category_breakdown(&txs);
        assert_eq!(
            breakdown,
            vec![
                CategoryAmount::new("Food", 350.0),
                CategoryAmount::new("Transport", 300.0),
                CategoryAmount::new("Bills", 50.0),
            ]
        );
    }

    #[test]
    fn test_breakdown_is_case_sensitive() {
        let txs = vec![expense("food", 10.0), expense("Food", 20.0)];
        let breakdown = compute_category_breakdown(&txs);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Food");
    }

    #[test]
    fn test_breakdown_truncates_to_top_five() {
        let txs: Vec<Transaction> = (1..=7)
            .map(|i| expense(&format!("Cat{}", i), i as f64 * 10.0))
            .collect();

        let breakdown = compute_category_breakdown(&txs);
        assert_eq!(breakdown.len(), TOP_CATEGORY_LIMIT);
        assert_eq!(breakdown[0].category, "Cat7");
        assert_eq!(breakdown[4].category, "Cat3");
    }

    #[test]
    fn test_breakdown_ties_keep_first_seen_order() {
        let txs = vec![
            expense("Books", 40.0),
            expense("Games", 60.0),
            expense("Music", 40.0),
            expense("Books", 20.0),
            expense("Music", 20.0),
        ];

        let breakdown = compute_category_breakdown(&txs);
        let names: Vec<&str> = breakdown.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Books", "Games", "Music"]);
    }

    #[test]
    fn test_breakdown_with_nan_amounts_does_not_panic() {
        let txs: Vec<Transaction> = (0..64)
            .map(|i| {
                let amount = if i % 3 == 0 { f64::NAN } else { i as f64 };
                expense(&format!("Cat{}", i), amount)
            })
            .collect();

        let breakdown = compute_category_breakdown(&txs);
        assert!(breakdown.len() <= TOP_CATEGORY_LIMIT);

        // Finite totals still rank among themselves
        let finite: Vec<f64> = breakdown
            .iter()
            .map(|c| c.amount)
            .filter(|a| a.is_finite())
            .collect();
        assert!(finite.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_stats_period_start_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
        assert_eq!(StatsPeriod::Today.start_date(today), today);
        assert_eq!(
            StatsPeriod::ThisMonth.start_date(today),
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
        );
        assert_eq!(
            StatsPeriod::ThisYear.start_date(today),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_stats_period_from_str() {
        assert_eq!("today".parse::<StatsPeriod>().unwrap(), StatsPeriod::Today);
        assert_eq!(
            "Monthly".parse::<StatsPeriod>().unwrap(),
            StatsPeriod::ThisMonth
        );
        assert_eq!(
            "this-year".parse::<StatsPeriod>().unwrap(),
            StatsPeriod::ThisYear
        );
        assert!("last-week".parse::<StatsPeriod>().is_err());
    }
}
