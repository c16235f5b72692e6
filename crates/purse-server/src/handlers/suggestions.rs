//! Spending suggestion handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, warn};

use crate::{AppError, AppState};
use purse_core::{Error, SuggestionRequest, SuggestionResponse};

/// POST /api/suggestions - Generate suggestions from monthly figures
///
/// The body is read raw so that a missing or wrong `Content-Type` doesn't
/// reject an otherwise valid JSON payload.
pub async fn create_suggestions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SuggestionResponse>, AppError> {
    let input = SuggestionRequest::parse(&body).map_err(|e| match e {
        Error::InvalidRequest(msg) | Error::InvalidData(msg) => {
            warn!(error = %msg, "Rejected suggestion request");
            AppError::bad_request(&msg)
        }
        other => AppError::from(other),
    })?;

    debug!(
        monthly_expense = input.monthly_expense,
        monthly_income = input.monthly_income,
        categories = input.category_breakdown.len(),
        "Generating suggestions"
    );

    let suggestions = state.config.engine.generate(&input);
    Ok(Json(SuggestionResponse { suggestions }))
}
