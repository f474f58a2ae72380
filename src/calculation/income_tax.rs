//! The income tax calculation entry point.
//!
//! This module chains the deduction stage and the bracket allocation stage
//! into the single calculation the engine exposes to its collaborators.

use rust_decimal::Decimal;

use crate::models::{
    AuditTrace, AuditWarning, BracketTable, CalculationResult, Deductions, TaxableAmounts,
};

use super::bracket_allocation::allocate_brackets;
use super::first_deduction::apply_first_deduction;
use super::second_deduction::apply_second_deduction;

/// Computes the yearly income tax for a gross income, UIT value and bracket
/// table.
///
/// A pure function: no I/O, no shared state, and deterministic — the same
/// inputs always produce an equal result. Callers are responsible for
/// supplying a positive UIT; the bracket table enforces its own invariants at
/// construction.
///
/// The pipeline is the two stages in order:
/// 1. the 20% deduction capped at 24 UIT, then the flat 7 UIT deduction,
///    producing the taxable base;
/// 2. allocation of the base across the brackets, producing per-bracket tax
///    and the total.
///
/// If the table has no open-ended top bracket and the base exceeds the total
/// capacity, the excess is left untaxed and a warning is recorded in the
/// audit trace.
///
/// # Examples
///
/// ```
/// use renta_engine::calculation::calculate_income_tax;
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
/// let result = calculate_income_tax(Decimal::from(50000), Decimal::from(4400), &table);
/// assert_eq!(result.taxable_amounts.final_amount, Decimal::from(9200));
/// assert_eq!(result.total_taxes, Decimal::from(736));
/// ```
pub fn calculate_income_tax(
    gross_yearly_income: Decimal,
    uit: Decimal,
    table: &BracketTable,
) -> CalculationResult {
    let mut steps = Vec::with_capacity(2 + table.len());
    let mut warnings = Vec::new();

    let first = apply_first_deduction(gross_yearly_income, uit, 1);
    steps.push(first.audit_step);

    let second = apply_second_deduction(first.after_deduction, uit, 2);
    steps.push(second.audit_step);

    let taxable_amounts = TaxableAmounts {
        initial_amount: gross_yearly_income,
        after_first_deduction: first.after_deduction,
        after_second_deduction: second.after_deduction,
        final_amount: second.after_deduction,
    };

    let allocation = allocate_brackets(taxable_amounts.final_amount, uit, table, 3);
    steps.extend(allocation.audit_steps);

    if !table.has_open_ended_top() {
        let allocated: Decimal = allocation
            .bracket_results
            .iter()
            .map(|b| b.taxable_amount)
            .sum();
        if allocated < taxable_amounts.final_amount {
            warnings.push(AuditWarning {
                code: "UNALLOCATED_INCOME".to_string(),
                message: format!(
                    "{} of the taxable base exceeds the total bracket capacity and is untaxed",
                    (taxable_amounts.final_amount - allocated).normalize()
                ),
                severity: "medium".to_string(),
            });
        }
    }

    CalculationResult {
        uit,
        deductions: Deductions {
            first: first.deduction,
            second: second.deduction,
        },
        taxable_amounts,
        bracket_results: allocation.bracket_results,
        total_taxes: allocation.total_taxes,
        audit_trace: AuditTrace { steps, warnings },
    }
}
