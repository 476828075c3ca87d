//! Error types for the tax engine.
//!
//! The calculation formulas themselves never fail: a non-positive revenue
//! yields an absent result and an unreachable break-even threshold yields a
//! sentinel. The errors here cover configuration loading, input validation
//! and a few lookups that can be asked for something that does not exist.

use thiserror::Error;

/// The main error type for the tax engine.
///
/// # Example
///
/// ```
/// use pl_tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table violated one of its invariants.
    #[error("Invalid rate table field '{field}': {message}")]
    InvalidRateTable {
        /// The offending field, as a dotted path.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// No rate table is configured for the requested fiscal year.
    #[error("Rate table not found for tax year {year}")]
    RateTableNotFound {
        /// The requested fiscal year.
        year: i32,
    },

    /// The lump-sum catalog has no entry for the category.
    #[error("Lump-sum category not found: {category}")]
    LumpSumCategoryNotFound {
        /// The requested activity category.
        category: String,
    },

    /// Caller-supplied input was outside its domain.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/jurisdiction.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/jurisdiction.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/rates/2025.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/rates/2025.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rate_table_displays_field_and_message() {
        let error = EngineError::InvalidRateTable {
            field: "social.pension".to_string(),
            message: "rate 1.2 is outside [0, 1]".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate table field 'social.pension': rate 1.2 is outside [0, 1]"
        );
    }

    #[test]
    fn test_rate_table_not_found_displays_year() {
        let error = EngineError::RateTableNotFound { year: 2019 };
        assert_eq!(error.to_string(), "Rate table not found for tax year 2019");
    }

    #[test]
    fn test_lump_sum_category_not_found_displays_category() {
        let error = EngineError::LumpSumCategoryNotFound {
            category: "astrology".to_string(),
        };
        assert_eq!(error.to_string(), "Lump-sum category not found: astrology");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "monthly_costs".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'monthly_costs': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::RateTableNotFound { year: 2000 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
