//! Configuration loading and management for the income tax engine.
//!
//! This module provides functionality to load tax regime configuration from
//! YAML files, including regime metadata, the fiscal-year UIT table, and the
//! progressive bracket scale.
//!
//! # Example
//!
//! ```no_run
//! use renta_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/renta_trabajo").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BracketsConfig, RegimeMetadata, TaxConfig, UitTableConfig};
