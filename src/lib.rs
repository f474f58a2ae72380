//! Income tax calculation engine for Peruvian rentas de trabajo.
//!
//! This crate computes the yearly personal income tax on employment income
//! under the Peruvian regime: a 20% deduction capped at 24 UIT, a flat 7 UIT
//! deduction, and a progressive bracket allocation of the remaining taxable
//! base (articles 45, 46 and 53 of the Ley del Impuesto a la Renta).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
