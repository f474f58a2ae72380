//! Request types for the income tax engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for the `/calculate` endpoint.
///
/// The gross income can be supplied directly, or as a breakdown of labeled
/// line items that the handler sums before invoking the calculation. When
/// both are present the direct amount wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The fiscal year to calculate for; selects the UIT value.
    pub year: i32,
    /// The gross yearly income, in soles.
    #[serde(default)]
    pub gross_yearly_income: Option<Decimal>,
    /// Labeled income line items, summed when no direct amount is given.
    #[serde(default)]
    pub income_items: Vec<IncomeItem>,
    /// Optional override for the UIT value, taking precedence over the
    /// year lookup. Must be positive.
    #[serde(default)]
    pub uit_override: Option<Decimal>,
}

/// A labeled income line item in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeItem {
    /// A label describing the income source (e.g., "salary", "bonus").
    pub label: String,
    /// The amount for this item, in soles.
    pub amount: Decimal,
}

impl CalculationRequest {
    /// Resolves the gross income for this request.
    ///
    /// Returns the direct amount when present, otherwise the sum of the
    /// income items, or `None` when neither was supplied.
    pub fn effective_gross_income(&self) -> Option<Decimal> {
        match self.gross_yearly_income {
            Some(amount) => Some(amount),
            None if self.income_items.is_empty() => None,
            None => Some(self.income_items.iter().map(|item| item.amount).sum()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_direct_income_request() {
        let json = r#"{
            "year": 2021,
            "gross_yearly_income": "120000"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.year, 2021);
        assert_eq!(request.effective_gross_income(), Some(dec("120000")));
        assert!(request.income_items.is_empty());
        assert!(request.uit_override.is_none());
    }

    #[test]
    fn test_deserialize_breakdown_request() {
        let json = r#"{
            "year": 2021,
            "income_items": [
                {"label": "salary", "amount": "96000"},
                {"label": "bonus", "amount": "24000"}
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.effective_gross_income(), Some(dec("120000")));
    }

    #[test]
    fn test_direct_amount_wins_over_breakdown() {
        let json = r#"{
            "year": 2021,
            "gross_yearly_income": "50000",
            "income_items": [
                {"label": "salary", "amount": "96000"}
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.effective_gross_income(), Some(dec("50000")));
    }

    #[test]
    fn test_missing_income_resolves_to_none() {
        let json = r#"{"year": 2021}"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.effective_gross_income(), None);
    }

    #[test]
    fn test_explicit_zero_income_is_not_missing() {
        let json = r#"{"year": 2021, "gross_yearly_income": "0"}"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.effective_gross_income(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_deserialize_uit_override() {
        let json = r#"{
            "year": 2021,
            "gross_yearly_income": "120000",
            "uit_override": "5000"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.uit_override, Some(dec("5000")));
    }
}
