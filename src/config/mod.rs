//! Configuration loading and management for the tax engine.
//!
//! This module provides the validated [`RateTable`] every engine call reads
//! from, and the [`ConfigLoader`] that loads one table per fiscal year from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use pl_tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pl").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyRates, EmployeeContributionRates, EmployerContributionRates, HealthRates, HealthTier,
    IncomeTaxRates, JurisdictionMetadata, PayrollRates, RateTable, RateTableParts, SocialRates,
    WageRates,
};
