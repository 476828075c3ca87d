//! Response types for the tax engine API.
//!
//! This module defines the success payloads that are not engine models,
//! the error response structures, and the mapping from engine errors.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BusinessFormComparison, EmploymentComparison};

/// Response body of the `/employment/net` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentNetResponse {
    /// Gross monthly salary.
    pub gross_salary: Decimal,
    /// Net monthly salary.
    pub net_salary: Decimal,
}

/// Response body of the `/compare` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResponse {
    /// JDG versus company verdict; null when revenue is not positive.
    pub business_forms: Option<BusinessFormComparison>,
    /// B2B versus employment verdict; null unless an employment gross was
    /// given and revenue is positive.
    pub employment: Option<EmploymentComparison>,
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable machine-readable code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    /// Message for humans.
    pub message: String,
    /// Extra context, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// An error body paired with the status it is sent with.
pub struct ApiErrorResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response around an error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let details = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidRateTable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Rate configuration is unavailable", details),
            ),
            EngineError::RateTableNotFound { year } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "RATE_TABLE_NOT_FOUND",
                    format!("No rate table for tax year {}", year),
                    "Omit tax_year to use the latest configured table",
                ),
            ),
            EngineError::LumpSumCategoryNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("LUMP_SUM_CATEGORY_NOT_FOUND", details),
            ),
            EngineError::InvalidInput { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(details))
            }
        };
        Self { status, error }
    }
}
