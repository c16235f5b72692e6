//! Suggestion request parsing and validation
//!
//! Request bodies are loosely typed JSON. Every field is named and checked
//! here before the engine sees it:
//! - `monthlyExpense`, `monthlyIncome` and `categoryBreakdown` are required
//! - amounts may be JSON numbers or strings holding a finite number
//! - amounts must not be negative; category names pass through as sent

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::CategoryAmount;

use super::SuggestionInput;

/// Raw request body as sent by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    #[serde(deserialize_with = "lenient_number")]
    pub monthly_expense: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub monthly_income: f64,
    pub category_breakdown: Vec<RequestCategory>,
}

/// One entry of `categoryBreakdown`
#[derive(Debug, Clone, Deserialize)]
pub struct RequestCategory {
    pub category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub amount: f64,
}

impl SuggestionRequest {
    /// Parse and validate a JSON body in one step
    pub fn parse(body: &[u8]) -> Result<SuggestionInput> {
        let request: SuggestionRequest =
            serde_json::from_slice(body).map_err(|e| Error::InvalidRequest(e.to_string()))?;
        request.validate()
    }

    /// Check value ranges and convert into engine input
    pub fn validate(self) -> Result<SuggestionInput> {
        check_amount("monthlyExpense", self.monthly_expense)?;
        check_amount("monthlyIncome", self.monthly_income)?;

        let mut breakdown = Vec::with_capacity(self.category_breakdown.len());
        for (i, entry) in self.category_breakdown.into_iter().enumerate() {
            check_amount(&format!("categoryBreakdown[{}].amount", i), entry.amount)?;
            breakdown.push(CategoryAmount::new(entry.category, entry.amount));
        }

        Ok(SuggestionInput::new(
            self.monthly_expense,
            self.monthly_income,
            breakdown,
        ))
    }
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidRequest(format!(
            "{} must be a finite number",
            field
        )));
    }
    if value < 0.0 {
        return Err(Error::InvalidRequest(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Accept a JSON number or a string containing one
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientNumber;

    impl<'de> Visitor<'de> for LenientNumber {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(LenientNumber)
}
