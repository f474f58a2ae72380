//! Configuration types for the tax regime.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, EngineResult};
use crate::models::{BracketTable, TaxBracket};

/// Metadata about the tax regime.
///
/// Contains identifying information about the regime, including its code,
/// name, version, and source URL.
#[derive(Debug, Clone, Deserialize)]
pub struct RegimeMetadata {
    /// The regime code (e.g., "renta_trabajo").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The version or latest covered fiscal year of the regime data.
    pub version: String,
    /// URL to the official statute documentation.
    pub source_url: String,
}

/// UIT table configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct UitTableConfig {
    /// Map of fiscal year to the UIT value for that year, in soles.
    pub values: HashMap<i32, Decimal>,
}

/// Bracket scale configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsConfig {
    /// Ordered bracket entries; the open-ended top entry omits its width.
    pub brackets: Vec<TaxBracket>,
}

/// The complete tax configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various YAML
/// files in a regime configuration directory. Construction validates every
/// UIT value and the bracket table, so lookups never revalidate.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    /// Regime metadata.
    metadata: RegimeMetadata,
    /// UIT value per fiscal year, ordered by year.
    uit_by_year: BTreeMap<i32, Decimal>,
    /// The validated progressive bracket scale.
    brackets: BracketTable,
}

impl TaxConfig {
    /// Creates a new TaxConfig from its component parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUnitValue` if any year's UIT is zero or negative, or
    /// `InvalidBracketTable` if the bracket entries violate a table
    /// invariant.
    pub fn new(
        metadata: RegimeMetadata,
        uit_values: HashMap<i32, Decimal>,
        brackets: Vec<TaxBracket>,
    ) -> EngineResult<Self> {
        let mut uit_by_year = BTreeMap::new();
        for (year, value) in uit_values {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidUnitValue { value });
            }
            uit_by_year.insert(year, value);
        }

        let brackets = BracketTable::new(brackets)?;

        Ok(Self {
            metadata,
            uit_by_year,
            brackets,
        })
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the UIT value for a fiscal year.
    pub fn uit_for_year(&self, year: i32) -> EngineResult<Decimal> {
        self.uit_by_year
            .get(&year)
            .copied()
            .ok_or(EngineError::YearNotFound { year })
    }

    /// Returns the configured fiscal years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.uit_by_year.keys().copied().collect()
    }

    /// Returns the progressive bracket scale.
    pub fn brackets(&self) -> &BracketTable {
        &self.brackets
    }
}
