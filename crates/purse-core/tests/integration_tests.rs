//! Integration tests for purse-core
//!
//! These tests exercise the full record → stats → suggestions workflow.

use chrono::NaiveDate;
use purse_core::{
    build_report, compute_stats, db::Database, generate_suggestions, CategoryAmount,
    NewTransaction, PaymentMethod, SuggestionEngine, SuggestionInput, SuggestionRequest,
    TransactionType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(
    db: &Database,
    user: &str,
    kind: TransactionType,
    category: &str,
    amount: f64,
    on: NaiveDate,
) {
    db.insert_transaction(
        user,
        &NewTransaction {
            amount,
            transaction_type: kind,
            category: category.to_string(),
            payment_method: PaymentMethod::Account,
            description: String::new(),
            transaction_date: on,
        },
    )
    .expect("Failed to record transaction");
}

/// A month matching the healthy-spending scenario:
/// income 10000, expenses 4000 split across Food, Transport and Bills
fn seed_month(db: &Database, user: &str) {
    record(db, user, TransactionType::Income, "Salary", 10000.0, date(2024, 6, 1));
    record(db, user, TransactionType::Expense, "Food", 900.0, date(2024, 6, 3));
    record(db, user, TransactionType::Expense, "Transport", 700.0, date(2024, 6, 8));
    record(db, user, TransactionType::Expense, "Food", 600.0, date(2024, 6, 12));
    record(db, user, TransactionType::Expense, "Bills", 1800.0, date(2024, 6, 15));
    // Last year and last month must not leak into the monthly window
    record(db, user, TransactionType::Expense, "Food", 5000.0, date(2023, 12, 31));
    record(db, user, TransactionType::Expense, "Food", 300.0, date(2024, 5, 31));
}

#[test]
fn test_report_windows() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    seed_month(&db, "alice");

    let report = build_report(&db, "alice", date(2024, 6, 15)).unwrap();

    assert_eq!(report.daily.total_expense, 1800.0);
    assert_eq!(report.daily.total_income, 0.0);

    assert_eq!(report.monthly.total_expense, 4000.0);
    assert_eq!(report.monthly.total_income, 10000.0);
    assert_eq!(report.monthly.net_balance, 6000.0);

    assert_eq!(report.yearly.total_expense, 4300.0);
    assert_eq!(report.yearly.net_balance, 5700.0);

    assert_eq!(
        report.category_breakdown,
        vec![
            CategoryAmount::new("Bills", 1800.0),
            CategoryAmount::new("Food", 1500.0),
            CategoryAmount::new("Transport", 700.0),
        ]
    );
}

#[test]
fn test_report_for_new_user_is_empty() {
    let db = Database::in_memory().unwrap();
    let report = build_report(&db, "nobody", date(2024, 6, 15)).unwrap();

    assert_eq!(report.monthly, compute_stats(&[]));
    assert!(report.category_breakdown.is_empty());

    let text = SuggestionEngine::default().generate(&SuggestionInput::from_report(&report));
    assert_eq!(text, purse_core::suggestions::NO_INCOME_MESSAGE);
}

#[test]
fn test_report_feeds_suggestions() {
    let db = Database::in_memory().unwrap();
    seed_month(&db, "alice");

    let report = build_report(&db, "alice", date(2024, 6, 20)).unwrap();
    let text = SuggestionEngine::default().generate(&SuggestionInput::from_report(&report));

    assert!(text.contains("healthy at 40.0%"));
    // Bills is the top category at 45% of expenses
    assert!(text.contains("'Bills' at 45.0%"));
    assert!(text.contains("Food spending is high at ₹1500.00"));
    assert!(text.contains("Transport costs are significant at ₹700.00"));
    assert!(text.contains("investing ₹6000.00"));
    assert!(text.ends_with("Balance ₹6000.00"));
}

#[test]
fn test_wire_request_matches_direct_call() {
    let body = br#"{
        "monthlyExpense": 4000,
        "monthlyIncome": "10000",
        "categoryBreakdown": [
            {"category": "Food", "amount": 1500},
            {"category": "Transport", "amount": "700"}
        ]
    }"#;

    let input = SuggestionRequest::parse(body).unwrap();
    let via_request = SuggestionEngine::default().generate(&input);
    let direct = generate_suggestions(
        4000.0,
        10000.0,
        &[
            CategoryAmount::new("Food", 1500.0),
            CategoryAmount::new("Transport", 700.0),
        ],
    );

    assert_eq!(via_request, direct);
}
