//! Allocation of the taxable base across the progressive brackets.
//!
//! This module distributes the taxable base over the bracket table in order
//! and computes the tax per bracket as per article 53 of the Ley del
//! Impuesto a la Renta.

use rust_decimal::Decimal;

use crate::models::{AuditStep, BracketResult, BracketTable};

use super::bracket_ranges::bracket_ranges;
use super::rounding::round_to_currency;

/// The result of allocating the taxable base, including per-bracket audit
/// steps.
#[derive(Debug, Clone)]
pub struct BracketAllocationResult {
    /// Per-bracket allocation results, in table order.
    pub bracket_results: Vec<BracketResult>,
    /// The exact sum of per-bracket taxes.
    pub total_taxes: Decimal,
    /// One audit step per bracket, in table order.
    pub audit_steps: Vec<AuditStep>,
}

/// Allocates a taxable base across the bracket table and computes the tax.
///
/// A single left-to-right pass: each bracket receives
/// `min(capacity, remaining)` while any base remains, the open-ended top
/// bracket receives everything left, and `taxes = round(rate × allocated)`
/// half-up per bracket. After a finite bracket the full capacity is
/// subtracted from `remaining` — not the allocated amount — so a partially
/// consumed bracket drives `remaining` negative and the `remaining <= 0`
/// guard zeroes every later bracket. On a table with no open-ended top,
/// income above the total capacity is left unallocated and untaxed.
///
/// # Arguments
///
/// * `taxable_base` - The base left by the deductions
/// * `uit` - The UIT value for the fiscal year
/// * `table` - The validated bracket table
/// * `start_step_number` - The first step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use renta_engine::calculation::allocate_brackets;
/// use renta_engine::models::{BracketTable, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = BracketTable::new(vec![
///     TaxBracket {
///         width_in_uit: Some(Decimal::from(5)),
///         rate: Decimal::from_str("0.08").unwrap(),
///     },
///     TaxBracket {
///         width_in_uit: None,
///         rate: Decimal::from_str("0.30").unwrap(),
///     },
/// ])
/// .unwrap();
///
/// let result = allocate_brackets(Decimal::from(18800), Decimal::from(4400), &table, 3);
/// assert_eq!(result.bracket_results[0].taxes, Decimal::from(1504));
/// assert_eq!(result.total_taxes, Decimal::from(1504));
/// ```
pub fn allocate_brackets(
    taxable_base: Decimal,
    uit: Decimal,
    table: &BracketTable,
    start_step_number: u32,
) -> BracketAllocationResult {
    let ranges = bracket_ranges(table, uit);

    let mut bracket_results = Vec::with_capacity(table.len());
    let mut audit_steps = Vec::with_capacity(table.len());
    let mut total_taxes = Decimal::ZERO;
    let mut remaining = taxable_base;

    for (index, bracket) in table.brackets().iter().enumerate() {
        let remaining_before = remaining;
        let capacity = bracket.capacity(uit);
        let mut taxable_amount = Decimal::ZERO;

        if remaining > Decimal::ZERO {
            match capacity {
                None => {
                    taxable_amount = remaining;
                }
                Some(capacity) => {
                    taxable_amount = capacity.min(remaining);
                    // Subtract the capacity, not the allocated amount: a
                    // partially consumed bracket leaves remaining negative,
                    // and the remaining <= 0 guard zeroes the rest.
                    remaining -= capacity;
                }
            }
        }

        let taxes = round_to_currency(bracket.rate * taxable_amount);
        total_taxes += taxes;

        audit_steps.push(AuditStep {
            step_number: start_step_number + index as u32,
            rule_id: "bracket_allocation".to_string(),
            rule_name: format!("Bracket {} Allocation", index + 1),
            article_ref: "Art. 53".to_string(),
            input: serde_json::json!({
                "remaining_before": remaining_before.normalize().to_string(),
                "capacity": capacity.map(|c| c.normalize().to_string()),
                "rate": bracket.rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "taxable_amount": taxable_amount.normalize().to_string(),
                "taxes": taxes.normalize().to_string()
            }),
            reasoning: format!(
                "round({} x {}) = {}",
                bracket.rate.normalize(),
                taxable_amount.normalize(),
                taxes.normalize()
            ),
        });

        bracket_results.push(BracketResult {
            range: ranges[index],
            rate: bracket.rate,
            taxable_amount,
            taxes,
        });
    }

    BracketAllocationResult {
        bracket_results,
        total_taxes,
        audit_steps,
    }
}
