//! HTTP API module for the income tax engine.
//!
//! This module provides the REST API endpoint for calculating the yearly
//! income tax on employment income.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, IncomeItem};
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
