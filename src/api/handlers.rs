//! HTTP request handlers for the tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_employment_net, compare_all_forms, compare_b2b_vs_employment,
    compare_business_forms, compare_spzoo_scenarios, find_spzoo_threshold,
};
use crate::error::EngineResult;
use crate::models::SpzooCalculationInput;

use super::request::{
    CompareRequest, EmploymentRequest, JdgRequest, SpzooRequest, ThresholdRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CompareResponse, EmploymentNetResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/jdg/compare", post(jdg_compare_handler))
        .route("/spzoo/compare", post(spzoo_compare_handler))
        .route("/spzoo/threshold", post(spzoo_threshold_handler))
        .route("/employment/net", post(employment_net_handler))
        .route("/compare", post(compare_handler))
        .with_state(state)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

/// Serializes a calculation outcome, logging how it went.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &str,
    started: Instant,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /jdg/compare.
///
/// Returns the comparison of all JDG regimes, or null for a non-positive
/// revenue.
async fn jdg_compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<JdgRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing JDG comparison request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = state.rate_table(request.tax_year).and_then(|table| {
        let input = request.into_input(table)?;
        Ok(compare_all_forms(&input, table))
    });
    respond(correlation_id, "jdg_compare", started, result)
}

/// Handler for POST /spzoo/compare.
///
/// Returns the comparison of all company payout strategies, or null for a
/// non-positive revenue.
async fn spzoo_compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<SpzooRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing company comparison request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = state.rate_table(request.tax_year).and_then(|table| {
        let input = request.into_input()?;
        Ok(compare_spzoo_scenarios(&input, table))
    });
    respond(correlation_id, "spzoo_compare", started, result)
}

/// Handler for POST /spzoo/threshold.
async fn spzoo_threshold_handler(
    State(state): State<AppState>,
    payload: Result<Json<ThresholdRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing threshold request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = state.rate_table(request.tax_year).and_then(|table| {
        request.validate()?;
        Ok(find_spzoo_threshold(
            request.target_monthly_net,
            request.monthly_costs,
            request.cit_rate,
            table,
        ))
    });
    respond(correlation_id, "spzoo_threshold", started, result)
}

/// Handler for POST /employment/net.
async fn employment_net_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmploymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employment net request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = state.rate_table(request.tax_year).and_then(|table| {
        request.validate()?;
        Ok(EmploymentNetResponse {
            gross_salary: request.gross_salary,
            net_salary: calculate_employment_net(request.gross_salary, table),
        })
    });
    respond(correlation_id, "employment_net", started, result)
}

/// Handler for POST /compare.
///
/// Runs both engines on the same revenue and costs and returns the
/// business-form verdict, plus the employment verdict when an employment
/// gross is given.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cross-form comparison request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let result = state.rate_table(request.jdg.tax_year).and_then(|table| {
        request.validate_employment_gross()?;
        let cit_rate = request.cit_rate;
        let employment_gross = request.employment_gross;
        let input = request.jdg.into_input(table)?;
        let spzoo_input =
            SpzooCalculationInput::new(input.monthly_revenue, input.monthly_costs, cit_rate);

        let business_forms = compare_all_forms(&input, table)
            .zip(compare_spzoo_scenarios(&spzoo_input, table))
            .and_then(|(jdg, spzoo)| compare_business_forms(&jdg, &spzoo, table));
        let employment = employment_gross
            .and_then(|gross| compare_b2b_vs_employment(&input, gross, table));

        Ok(CompareResponse {
            business_forms,
            employment,
        })
    });
    respond(correlation_id, "compare", started, result)
}
