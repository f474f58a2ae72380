//! Second deduction: a flat 7 UIT.
//!
//! This module applies the fixed deduction of article 46 of the Ley del
//! Impuesto a la Renta to the base left by the first deduction.

use rust_decimal::Decimal;

use crate::models::{AuditStep, SecondDeduction};

/// The deduction size expressed in UIT multiples (7 UIT).
///
/// Per article 46 of the Ley del Impuesto a la Renta.
pub const SECOND_DEDUCTION_UIT: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// The result of applying the second deduction, including the audit step.
#[derive(Debug, Clone)]
pub struct SecondDeductionResult {
    /// The deduction record as applied.
    pub deduction: SecondDeduction,
    /// The base remaining after the deduction: the taxable base fed to
    /// bracket allocation.
    pub after_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the flat 7 UIT deduction to the base left by the first deduction.
///
/// The deducted amount is `min(7 × uit, after_first)`. No rounding is applied
/// here; only the first deduction rounds. When the remaining base is smaller
/// than 7 UIT the whole base is deducted, which drives the taxable base to
/// exactly zero — including for a negative base, where the "deduction"
/// is itself negative.
///
/// # Arguments
///
/// * `after_first` - The base remaining after the first deduction
/// * `uit` - The UIT value for the fiscal year
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use renta_engine::calculation::apply_second_deduction;
/// use rust_decimal::Decimal;
///
/// let result = apply_second_deduction(Decimal::from(40000), Decimal::from(4400), 2);
/// assert_eq!(result.deduction.deducted_amount, Decimal::from(30800));
/// assert_eq!(result.after_deduction, Decimal::from(9200));
/// ```
pub fn apply_second_deduction(
    after_first: Decimal,
    uit: Decimal,
    step_number: u32,
) -> SecondDeductionResult {
    let expected_amount = SECOND_DEDUCTION_UIT * uit;
    let deducted_amount = expected_amount.min(after_first);
    let after_deduction = after_first - deducted_amount;

    let audit_step = AuditStep {
        step_number,
        rule_id: "second_deduction".to_string(),
        rule_name: "7 UIT Deduction".to_string(),
        article_ref: "Art. 46".to_string(),
        input: serde_json::json!({
            "after_first_deduction": after_first.normalize().to_string(),
            "uit": uit.normalize().to_string(),
            "expected_amount": expected_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "deducted_amount": deducted_amount.normalize().to_string(),
            "after_deduction": after_deduction.normalize().to_string(),
            "fully_applied": deducted_amount == expected_amount
        }),
        reasoning: format!(
            "min({}, {}) = {}",
            expected_amount.normalize(),
            after_first.normalize(),
            deducted_amount.normalize()
        ),
    };

    SecondDeductionResult {
        deduction: SecondDeduction {
            amount_in_uit: SECOND_DEDUCTION_UIT,
            expected_amount,
            deducted_amount,
        },
        after_deduction,
        audit_step,
    }
}
