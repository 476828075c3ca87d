//! Application state for the tax engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, RateTable};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded rate tables, shared read-only across all request
/// handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves the rate table for a request's optional tax year.
    pub fn rate_table(&self, tax_year: Option<i32>) -> EngineResult<&RateTable> {
        self.config.resolve(tax_year)
    }
}
