//! Deduction models and the taxable amount ledger.
//!
//! This module contains the [`Deductions`] record describing the two
//! statutory deductions and the [`TaxableAmounts`] ledger tracking the base
//! after each one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The 20% deduction capped at 24 UIT (article 45).
///
/// # Example
///
/// ```
/// use renta_engine::models::FirstDeduction;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deduction = FirstDeduction {
///     percentage: Decimal::from_str("0.2").unwrap(),
///     cap_in_uit: Decimal::from(24),
///     cap: Decimal::from(105600),
///     deducted_amount: Decimal::from(10000),
/// };
/// assert!(deduction.deducted_amount <= deduction.cap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstDeduction {
    /// The deduction percentage applied to gross income.
    pub percentage: Decimal,
    /// The deduction cap expressed in UIT multiples.
    pub cap_in_uit: Decimal,
    /// The deduction cap in absolute soles (`cap_in_uit` × UIT).
    pub cap: Decimal,
    /// The amount actually deducted, rounded to whole soles.
    pub deducted_amount: Decimal,
}

/// The flat 7 UIT deduction (article 46).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondDeduction {
    /// The deduction size expressed in UIT multiples.
    pub amount_in_uit: Decimal,
    /// The full deduction in absolute soles (`amount_in_uit` × UIT).
    pub expected_amount: Decimal,
    /// The amount actually deducted. Capped by the remaining base and,
    /// unlike the first deduction, never rounded.
    pub deducted_amount: Decimal,
}

/// Both statutory deductions applied to gross income, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// The 20% deduction capped at 24 UIT.
    pub first: FirstDeduction,
    /// The flat 7 UIT deduction.
    pub second: SecondDeduction,
}

/// Running ledger of the taxable base after each deduction.
///
/// # Example
///
/// ```
/// use renta_engine::models::TaxableAmounts;
/// use rust_decimal::Decimal;
///
/// let amounts = TaxableAmounts {
///     initial_amount: Decimal::from(50000),
///     after_first_deduction: Decimal::from(40000),
///     after_second_deduction: Decimal::from(9200),
///     final_amount: Decimal::from(9200),
/// };
/// assert_eq!(amounts.final_amount, amounts.after_second_deduction);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableAmounts {
    /// The gross yearly income before any deduction.
    pub initial_amount: Decimal,
    /// The base after the 20% deduction. Negative gross income leaves this
    /// negative.
    pub after_first_deduction: Decimal,
    /// The base after the 7 UIT deduction.
    pub after_second_deduction: Decimal,
    /// The taxable base fed to bracket allocation. Always equals
    /// `after_second_deduction`.
    pub final_amount: Decimal,
}
