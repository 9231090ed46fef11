//! HTTP request handlers for the Courier Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_price_for, summarize_raw_records};
use crate::models::ParcelPricingRequest;

use super::request::{EarningsRequest, PriceRequest};
use super::response::{ApiError, ApiErrorResponse, TariffResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/price", post(price_handler))
        .route("/earnings/summary", post(earnings_handler))
        .route("/tariff", get(tariff_handler))
        .with_state(state)
}

/// Handler for POST /price.
///
/// Prices a single parcel against the configured tariff.
async fn price_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing price request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = ParcelPricingRequest::try_from(request)
        .and_then(|parsed| compute_price_for(&parsed, state.config().tariff()));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                shipment_type = %result.shipment_type,
                destination_class = %result.destination_class,
                total_cost = %result.total_cost,
                duration_us = start_time.elapsed().as_micros(),
                "Price computed successfully"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Pricing rejected");
            error_response(err.into())
        }
    }
}

/// Handler for POST /earnings/summary.
///
/// Aggregates a rider's completed deliveries. Malformed records are skipped
/// and reported in the summary rather than failing the request.
async fn earnings_handler(
    State(state): State<AppState>,
    payload: Result<Json<EarningsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing earnings summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let now = request
        .now
        .unwrap_or_else(|| Utc::now().with_timezone(&config.timezone()));

    let start_time = Instant::now();
    let record_count = request.records.len();
    let summary = summarize_raw_records(request.records, now, config.earnings());

    info!(
        correlation_id = %correlation_id,
        records = record_count,
        skipped = summary.skipped_records.len(),
        total = %summary.total,
        duration_us = start_time.elapsed().as_micros(),
        "Earnings summarized successfully"
    );

    json_response(StatusCode::OK, &summary)
}

/// Handler for GET /tariff.
///
/// Returns the active service metadata, tariff and earnings policy.
async fn tariff_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    let body = TariffResponse {
        service: config.service().clone(),
        tariff: config.tariff().clone(),
        earnings: config.earnings().clone(),
    };
    json_response(StatusCode::OK, &body)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
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

    json_response(StatusCode::BAD_REQUEST, &error)
}
