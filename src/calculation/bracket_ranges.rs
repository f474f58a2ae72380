//! Conversion of the bracket table into absolute income ranges.

use rust_decimal::Decimal;

use crate::models::{BracketRange, BracketTable};

/// Derives the absolute income range covered by each bracket.
///
/// Ranges are produced by accumulating bracket widths multiplied by the UIT
/// value, so they are contiguous from zero and non-overlapping. The last
/// range has no upper bound exactly when the last bracket is open-ended.
///
/// # Examples
///
/// ```
/// use renta_engine::calculation::bracket_ranges;
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
/// let ranges = bracket_ranges(&table, Decimal::from(4400));
/// assert_eq!(ranges[0].max, Some(Decimal::from(22000)));
/// assert_eq!(ranges[1].min, Decimal::from(22000));
/// assert_eq!(ranges[1].max, None);
/// ```
pub fn bracket_ranges(table: &BracketTable, uit: Decimal) -> Vec<BracketRange> {
    let mut ranges = Vec::with_capacity(table.len());
    let mut lower = Decimal::ZERO;

    for bracket in table.brackets() {
        match bracket.capacity(uit) {
            Some(capacity) => {
                let upper = lower + capacity;
                ranges.push(BracketRange {
                    min: lower,
                    max: Some(upper),
                });
                lower = upper;
            }
            None => {
                ranges.push(BracketRange {
                    min: lower,
                    max: None,
                });
            }
        }
    }

    ranges
}
