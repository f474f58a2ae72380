//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount half-up to the nearest whole sol.
///
/// Midpoints round away from zero, so `0.5` becomes `1`.
///
/// # Examples
///
/// ```
/// use renta_engine::calculation::round_to_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("1504.5").unwrap();
/// assert_eq!(round_to_currency(amount), Decimal::from(1505));
/// ```
pub fn round_to_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
