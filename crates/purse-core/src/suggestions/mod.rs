//! Spending Suggestions
//!
//! A fixed sequence of threshold rules turns a month's income, expenses and
//! top expense categories into an advisory text. The engine never looks at
//! raw transactions, only at figures already reduced by [`crate::stats`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use purse_core::suggestions::{SuggestionEngine, SuggestionRequest};
//!
//! let input = SuggestionRequest::parse(body)?;
//! let text = SuggestionEngine::default().generate(&input);
//! ```

pub mod engine;
pub mod request;

use serde::{Deserialize, Serialize};

use crate::models::CategoryAmount;
use crate::stats::StatsReport;

pub use engine::{generate_suggestions, SuggestionEngine, DEFAULT_CURRENCY, NO_INCOME_MESSAGE};
pub use request::SuggestionRequest;

/// Validated figures the engine works from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionInput {
    pub monthly_expense: f64,
    pub monthly_income: f64,
    /// Ranked highest first, as produced by the stats breakdown
    pub category_breakdown: Vec<CategoryAmount>,
}

impl SuggestionInput {
    pub fn new(
        monthly_expense: f64,
        monthly_income: f64,
        category_breakdown: Vec<CategoryAmount>,
    ) -> Self {
        Self {
            monthly_expense,
            monthly_income,
            category_breakdown,
        }
    }

    /// Use the monthly window of a stats report
    pub fn from_report(report: &StatsReport) -> Self {
        Self::new(
            report.monthly.total_expense,
            report.monthly.total_income,
            report.category_breakdown.clone(),
        )
    }
}

/// Body returned by the suggestion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: String,
}
