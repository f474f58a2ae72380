//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax regime
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::BracketTable;

use super::types::{BracketsConfig, RegimeMetadata, TaxConfig, UitTableConfig};

/// Loads and provides access to tax regime configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides methods to query the UIT table and the bracket scale.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/renta_trabajo/
/// ├── regime.yaml    # Regime metadata
/// ├── uit.yaml       # UIT value per fiscal year
/// └── brackets.yaml  # Progressive bracket scale
/// ```
///
/// # Example
///
/// ```no_run
/// use renta_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/renta_trabajo").unwrap();
///
/// // Get the UIT for a fiscal year
/// let uit = loader.get_uit(2021).unwrap();
/// println!("UIT 2021: S/ {}", uit);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/renta_trabajo")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A UIT value is zero or negative
    /// - The bracket entries violate a table invariant
    ///
    /// # Example
    ///
    /// ```no_run
    /// use renta_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/renta_trabajo")?;
    /// # Ok::<(), renta_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load regime.yaml
        let regime_path = path.join("regime.yaml");
        let metadata = Self::load_yaml::<RegimeMetadata>(&regime_path)?;

        // Load uit.yaml
        let uit_path = path.join("uit.yaml");
        let uit_config = Self::load_yaml::<UitTableConfig>(&uit_path)?;

        // Load brackets.yaml
        let brackets_path = path.join("brackets.yaml");
        let brackets_config = Self::load_yaml::<BracketsConfig>(&brackets_path)?;

        let config = TaxConfig::new(metadata, uit_config.values, brackets_config.brackets)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Gets the UIT value for a fiscal year.
    ///
    /// # Arguments
    ///
    /// * `year` - The fiscal year (e.g., 2021)
    ///
    /// # Returns
    ///
    /// Returns the UIT value if the year is configured, or `YearNotFound`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use renta_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/renta_trabajo")?;
    /// let uit = loader.get_uit(2021)?;
    /// assert!(uit > rust_decimal::Decimal::ZERO);
    /// # Ok::<(), renta_engine::error::EngineError>(())
    /// ```
    pub fn get_uit(&self, year: i32) -> EngineResult<Decimal> {
        self.config.uit_for_year(year)
    }

    /// Returns the progressive bracket scale.
    pub fn brackets(&self) -> &BracketTable {
        self.config.brackets()
    }

    /// Returns the configured fiscal years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.config.years()
    }
}
