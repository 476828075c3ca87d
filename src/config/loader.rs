//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate tables
//! from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, RateTable, RateTableParts};

/// Loads and provides access to the fiscal-year rate tables.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every rate table and keeps them ordered by effective date.
///
/// # Directory Structure
///
/// ```text
/// config/pl/
/// ├── jurisdiction.yaml   # Jurisdiction metadata
/// └── rates/
///     └── 2025.yaml       # One rate table per fiscal year
/// ```
///
/// # Example
///
/// ```no_run
/// use pl_tax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pl").unwrap();
/// let table = loader.rate_table_for_year(2025).unwrap();
/// println!("Minimum wage: {}", table.wages().minimum_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    jurisdiction: JurisdictionMetadata,
    tables: Vec<RateTable>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/pl")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any rate table breaks a rate or threshold invariant
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdiction = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let mut tables = Self::load_rates(&path.join("rates"))?;
        tables.sort_by_key(|table| table.effective_date());

        tracing::debug!(
            jurisdiction = %jurisdiction.code,
            tables = tables.len(),
            "Loaded rate tables"
        );

        Ok(Self {
            jurisdiction,
            tables,
        })
    }

    /// Builds a loader around tables that are already in memory.
    pub fn from_tables(jurisdiction: JurisdictionMetadata, mut tables: Vec<RateTable>) -> Self {
        tables.sort_by_key(|table| table.effective_date());
        Self {
            jurisdiction,
            tables,
        }
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

    /// Loads and validates all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let parts = Self::load_yaml::<RateTableParts>(&path)?;
                tables.push(RateTable::new(parts)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.jurisdiction
    }

    /// Returns every loaded table, oldest first.
    pub fn tables(&self) -> &[RateTable] {
        &self.tables
    }

    /// Gets the rate table of a fiscal year.
    ///
    /// # Returns
    ///
    /// Returns `RateTableNotFound` if no table was loaded for the year.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pl_tax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/pl")?;
    /// let table = loader.rate_table_for_year(2025)?;
    /// assert_eq!(table.tax_year(), 2025);
    /// # Ok::<(), pl_tax_engine::error::EngineError>(())
    /// ```
    pub fn rate_table_for_year(&self, year: i32) -> EngineResult<&RateTable> {
        self.tables
            .iter()
            .find(|table| table.tax_year() == year)
            .ok_or(EngineError::RateTableNotFound { year })
    }

    /// Gets the most recent table effective on or before the given date.
    pub fn rate_table_for_date(&self, date: NaiveDate) -> Option<&RateTable> {
        self.tables
            .iter()
            .rev()
            .find(|table| table.effective_date() <= date)
    }

    /// Returns the table with the latest effective date.
    pub fn latest(&self) -> Option<&RateTable> {
        self.tables.last()
    }

    /// Resolves an optional year to a table, defaulting to the latest one.
    pub fn resolve(&self, year: Option<i32>) -> EngineResult<&RateTable> {
        match year {
            Some(year) => self.rate_table_for_year(year),
            None => self.latest().ok_or_else(|| EngineError::ConfigNotFound {
                path: "no rate tables loaded".to_string(),
            }),
        }
    }

    /// Gets the lump-sum rate of a category from the latest table.
    pub fn lump_sum_rate(&self, category: &str) -> EngineResult<Decimal> {
        self.resolve(None)?.lump_sum_rate(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/pl"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.jurisdiction().code, "PL");
        assert_eq!(loader.jurisdiction().currency, "PLN");
    }

    #[test]
    fn test_yaml_table_matches_builtin_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.rate_table_for_year(2025).unwrap();

        assert_eq!(table, &RateTable::pl_2025());
    }

    #[test]
    fn test_unknown_year_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.rate_table_for_year(1999) {
            Err(EngineError::RateTableNotFound { year }) => assert_eq!(year, 1999),
            other => panic!("Expected RateTableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_table_for_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(loader.rate_table_for_date(date).unwrap().tax_year(), 2025);

        let before = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(loader.rate_table_for_date(before).is_none());
    }

    #[test]
    fn test_resolve_defaults_to_latest() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.resolve(None).unwrap().tax_year(), 2025);
    }

    #[test]
    fn test_lump_sum_rate_by_category() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.lump_sum_rate("professionals").unwrap(), dec("0.17"));
        assert!(matches!(
            loader.lump_sum_rate("unknown"),
            Err(EngineError::LumpSumCategoryNotFound { .. })
        ));
    }

    #[test]
    fn test_from_tables_orders_by_effective_date() {
        let mut older = RateTable::pl_2025().into_parts();
        older.tax_year = 2024;
        older.effective_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let older = RateTable::new(older).unwrap();

        let loader = ConfigLoader::from_tables(
            JurisdictionMetadata {
                code: "PL".to_string(),
                name: "Poland".to_string(),
                currency: "PLN".to_string(),
                source_url: String::new(),
            },
            vec![RateTable::pl_2025(), older],
        );

        assert_eq!(loader.tables()[0].tax_year(), 2024);
        assert_eq!(loader.latest().unwrap().tax_year(), 2025);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("jurisdiction.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}
