//! HTTP request handlers for the income tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_income_tax;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the calculated income tax.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Resolve the gross income from the direct amount or the breakdown
    let Some(gross_income) = request.effective_gross_income() else {
        warn!(
            correlation_id = %correlation_id,
            year = request.year,
            "Request carries neither gross_yearly_income nor income_items"
        );
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ApiError::validation_error(
                "either gross_yearly_income or income_items must be provided",
            )),
        )
            .into_response();
    };

    // Resolve the UIT from the override or the configured year table
    let uit = match resolve_uit(&request, state.config()) {
        Ok(uit) => uit,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                year = request.year,
                error = %err,
                "UIT resolution failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    // Perform the calculation
    let start_time = Instant::now();
    let calculation = calculate_income_tax(gross_income, uit, state.config().brackets());
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        year = request.year,
        gross_income = %gross_income,
        total_taxes = %calculation.total_taxes,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    let response = CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year: request.year,
        duration_us: duration.as_micros() as u64,
        calculation,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Resolves the UIT value for a request.
///
/// An explicit override takes precedence over the configured year table but
/// must be positive.
fn resolve_uit(request: &CalculationRequest, config: &ConfigLoader) -> EngineResult<Decimal> {
    match request.uit_override {
        Some(value) if value <= Decimal::ZERO => Err(EngineError::InvalidUnitValue { value }),
        Some(value) => Ok(value),
        None => config.get_uit(request.year),
    }
}
