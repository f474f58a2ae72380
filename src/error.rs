//! Error types for the income tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax configuration
//! or serving calculations.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the income tax engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use renta_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No UIT value is configured for the requested fiscal year.
    #[error("No UIT value configured for year {year}")]
    YearNotFound {
        /// The fiscal year that was requested.
        year: i32,
    },

    /// The bracket table violated a construction invariant.
    #[error("Invalid bracket table: {message}")]
    InvalidBracketTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// A UIT value was zero or negative.
    #[error("Invalid UIT value: {value} (must be positive)")]
    InvalidUnitValue {
        /// The offending value.
        value: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
