//! Calculation result models for the income tax engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures that capture all outputs from a tax calculation, including the
//! deduction ledger, per-bracket results, the total tax, and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketRange, Deductions, TaxableAmounts};

/// The portion of the taxable base allocated to one bracket and the tax it
/// produces.
///
/// # Example
///
/// ```
/// use renta_engine::models::{BracketRange, BracketResult};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = BracketResult {
///     range: BracketRange {
///         min: Decimal::ZERO,
///         max: Some(Decimal::from(22000)),
///     },
///     rate: Decimal::from_str("0.08").unwrap(),
///     taxable_amount: Decimal::from(18800),
///     taxes: Decimal::from(1504),
/// };
/// assert_eq!(result.taxes, Decimal::from(1504));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResult {
    /// The bracket's income range in absolute soles.
    pub range: BracketRange,
    /// The tax rate applied within this bracket.
    pub rate: Decimal,
    /// The portion of the taxable base allocated to this bracket.
    pub taxable_amount: Decimal,
    /// The tax for this bracket, rounded to whole soles.
    pub taxes: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the income tax law article for this rule.
    pub article_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Records every decision made during the calculation process for
/// transparency. Carries no timestamps so two runs over the same inputs
/// produce identical traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of an income tax calculation.
///
/// A pure function of its inputs: the same UIT, gross income and bracket
/// table always produce an equal result.
///
/// # Example
///
/// ```
/// use renta_engine::models::{
///     AuditTrace, CalculationResult, Deductions, FirstDeduction, SecondDeduction,
///     TaxableAmounts,
/// };
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = CalculationResult {
///     uit: Decimal::from(4400),
///     deductions: Deductions {
///         first: FirstDeduction {
///             percentage: Decimal::from_str("0.2").unwrap(),
///             cap_in_uit: Decimal::from(24),
///             cap: Decimal::from(105600),
///             deducted_amount: Decimal::ZERO,
///         },
///         second: SecondDeduction {
///             amount_in_uit: Decimal::from(7),
///             expected_amount: Decimal::from(30800),
///             deducted_amount: Decimal::ZERO,
///         },
///     },
///     taxable_amounts: TaxableAmounts {
///         initial_amount: Decimal::ZERO,
///         after_first_deduction: Decimal::ZERO,
///         after_second_deduction: Decimal::ZERO,
///         final_amount: Decimal::ZERO,
///     },
///     bracket_results: vec![],
///     total_taxes: Decimal::ZERO,
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///     },
/// };
/// assert_eq!(result.total_taxes, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The UIT value used for this calculation.
    pub uit: Decimal,
    /// The two statutory deductions as applied.
    pub deductions: Deductions,
    /// The taxable base after each deduction.
    pub taxable_amounts: TaxableAmounts,
    /// Per-bracket allocation results, in table order.
    pub bracket_results: Vec<BracketResult>,
    /// The total tax: the exact sum of per-bracket taxes, not separately
    /// rounded.
    pub total_taxes: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
