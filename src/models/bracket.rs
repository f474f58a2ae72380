//! Tax bracket models and the validated bracket table.
//!
//! This module defines the [`TaxBracket`] entry, the [`BracketTable`] built
//! from an ordered sequence of entries, and the [`BracketRange`] describing a
//! bracket's slice of income in absolute soles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single entry of the progressive tax scale.
///
/// The width is expressed in UIT multiples rather than absolute currency so
/// the same table serves every fiscal year. An absent width marks the
/// open-ended top bracket.
///
/// # Example
///
/// ```
/// use renta_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     width_in_uit: Some(Decimal::from(5)),
///     rate: Decimal::from_str("0.08").unwrap(),
/// };
/// assert!(!bracket.is_open_ended());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The width of the bracket in UIT multiples. `None` means the bracket
    /// has no upper bound and absorbs all remaining income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_in_uit: Option<Decimal>,
    /// The tax rate applied within this bracket, as a fraction in [0, 1].
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if this bracket has no upper bound.
    pub fn is_open_ended(&self) -> bool {
        self.width_in_uit.is_none()
    }

    /// Returns the bracket capacity in absolute soles for a given UIT value,
    /// or `None` for an open-ended bracket.
    pub fn capacity(&self, uit: Decimal) -> Option<Decimal> {
        self.width_in_uit.map(|width| width * uit)
    }
}

/// An ordered, validated sequence of tax brackets.
///
/// Construction enforces the caller contract so the per-calculation hot path
/// never has to: the table must be non-empty, every finite width must be
/// positive, every rate must lie in [0, 1], and at most one entry may be
/// open-ended, in the last position only.
///
/// # Example
///
/// ```
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
/// assert_eq!(table.len(), 2);
/// assert!(table.has_open_ended_top());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a bracket table, validating the construction invariants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBracketTable` if the table is empty, a finite width is
    /// zero or negative, a rate falls outside [0, 1], or an open-ended entry
    /// appears anywhere but the last position.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidBracketTable {
                message: "table must contain at least one bracket".to_string(),
            });
        }

        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::InvalidBracketTable {
                    message: format!(
                        "bracket {} has rate {} outside [0, 1]",
                        index, bracket.rate
                    ),
                });
            }

            match bracket.width_in_uit {
                Some(width) if width <= Decimal::ZERO => {
                    return Err(EngineError::InvalidBracketTable {
                        message: format!("bracket {} has non-positive width {}", index, width),
                    });
                }
                None if index != last_index => {
                    return Err(EngineError::InvalidBracketTable {
                        message: format!(
                            "open-ended bracket at position {} must be the last entry",
                            index
                        ),
                    });
                }
                _ => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the number of brackets in the table.
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Returns true if the table has no brackets. Construction forbids this,
    /// so the method exists for API completeness.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Returns true if the last bracket is open-ended.
    pub fn has_open_ended_top(&self) -> bool {
        self.brackets
            .last()
            .is_some_and(TaxBracket::is_open_ended)
    }

    /// Returns the brackets in allocation order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// A bracket's slice of income in absolute soles.
///
/// Derived by accumulating bracket widths multiplied by the UIT value. `max`
/// is `None` exactly when the bracket is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRange {
    /// The lower bound of the range (inclusive), in soles.
    pub min: Decimal,
    /// The upper bound of the range (exclusive), in soles, or `None` for the
    /// open-ended top bracket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}
