//! First deduction: 20% of gross income, capped at 24 UIT.
//!
//! This module applies the percentage deduction of article 45 of the Ley del
//! Impuesto a la Renta to gross yearly income.

use rust_decimal::Decimal;

use crate::models::{AuditStep, FirstDeduction};

use super::rounding::round_to_currency;

/// The deduction percentage applied to gross income (20%).
///
/// Per article 45 of the Ley del Impuesto a la Renta.
pub const FIRST_DEDUCTION_PERCENTAGE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// The deduction cap expressed in UIT multiples (24 UIT).
///
/// Per article 45 of the Ley del Impuesto a la Renta.
pub const FIRST_DEDUCTION_CAP_UIT: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// The result of applying the first deduction, including the audit step.
#[derive(Debug, Clone)]
pub struct FirstDeductionResult {
    /// The deduction record as applied.
    pub deduction: FirstDeduction,
    /// The base remaining after the deduction. Negative gross income leaves
    /// this negative.
    pub after_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the 20% deduction capped at 24 UIT to gross yearly income.
///
/// The deducted amount is `round(min(gross × 0.20, 24 × uit))`, rounded
/// half-up to whole soles. The second deduction is deliberately not rounded;
/// only this one is.
///
/// # Arguments
///
/// * `gross_income` - The gross yearly income in soles
/// * `uit` - The UIT value for the fiscal year
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use renta_engine::calculation::apply_first_deduction;
/// use rust_decimal::Decimal;
///
/// let result = apply_first_deduction(Decimal::from(50000), Decimal::from(4400), 1);
/// assert_eq!(result.deduction.deducted_amount, Decimal::from(10000));
/// assert_eq!(result.after_deduction, Decimal::from(40000));
/// ```
pub fn apply_first_deduction(
    gross_income: Decimal,
    uit: Decimal,
    step_number: u32,
) -> FirstDeductionResult {
    let cap = FIRST_DEDUCTION_CAP_UIT * uit;
    let percentage_amount = gross_income * FIRST_DEDUCTION_PERCENTAGE;
    let deducted_amount = round_to_currency(percentage_amount.min(cap));
    let after_deduction = gross_income - deducted_amount;

    let audit_step = AuditStep {
        step_number,
        rule_id: "first_deduction".to_string(),
        rule_name: "20% Deduction".to_string(),
        article_ref: "Art. 45".to_string(),
        input: serde_json::json!({
            "gross_income": gross_income.normalize().to_string(),
            "uit": uit.normalize().to_string(),
            "cap": cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "deducted_amount": deducted_amount.normalize().to_string(),
            "after_deduction": after_deduction.normalize().to_string(),
            "cap_applied": percentage_amount > cap
        }),
        reasoning: format!(
            "round(min({} x {}, {})) = {}",
            gross_income.normalize(),
            FIRST_DEDUCTION_PERCENTAGE.normalize(),
            cap.normalize(),
            deducted_amount.normalize()
        ),
    };

    FirstDeductionResult {
        deduction: FirstDeduction {
            percentage: FIRST_DEDUCTION_PERCENTAGE,
            cap_in_uit: FIRST_DEDUCTION_CAP_UIT,
            cap,
            deducted_amount,
        },
        after_deduction,
        audit_step,
    }
}
