//! HTTP API module for the tax engine.
//!
//! This module provides the REST API endpoints for comparing
//! sole-proprietorship regimes, company payout strategies and employment
//! contracts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompareRequest, EmploymentRequest, JdgRequest, SpzooRequest, ThresholdRequest};
pub use response::{ApiError, ApiErrorResponse, CompareResponse, EmploymentNetResponse};
pub use state::AppState;
