//! Core data models for the income tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bracket;
mod calculation_result;
mod deductions;

pub use bracket::{BracketRange, BracketTable, TaxBracket};
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BracketResult, CalculationResult,
};
pub use deductions::{Deductions, FirstDeduction, SecondDeduction, TaxableAmounts};
