//! Request types for the Courier Engine API.
//!
//! This module defines the JSON request structures for the `/price` and
//! `/earnings/summary` endpoints.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ParcelPricingRequest, RawDeliveryRecord, parse_weight};

/// Request body for the `/price` endpoint.
///
/// Enum fields are taken as plain strings so that unknown values are reported
/// as `INVALID_INPUT` rather than as a body parse failure. `weight_kg` may be
/// a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    /// `document` or `non_document` (`non-document` is accepted).
    pub shipment_type: String,
    /// `same_district` / `outside_district` (`same` / `outside` accepted).
    #[serde(alias = "destination")]
    pub destination_class: String,
    /// Parcel weight in kilograms.
    #[serde(default)]
    pub weight_kg: Option<serde_json::Value>,
}

impl TryFrom<PriceRequest> for ParcelPricingRequest {
    type Error = EngineError;

    fn try_from(req: PriceRequest) -> EngineResult<Self> {
        let mut parsed = ParcelPricingRequest::parse(&req.shipment_type, &req.destination_class, None)?;
        parsed.weight_kg = match req.weight_kg {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Number(n)) => Some(parse_weight(&n.to_string())?),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
            Some(serde_json::Value::String(s)) => Some(parse_weight(s.trim())?),
            Some(other) => {
                return Err(EngineError::invalid_input(
                    "weight_kg",
                    format!("'{}' is not a number", other),
                ));
            }
        };
        Ok(parsed)
    }
}

/// Request body for the `/earnings/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsRequest {
    /// Reference instant for period buckets (RFC 3339). Defaults to the
    /// current time in the service's configured offset.
    #[serde(default)]
    pub now: Option<DateTime<FixedOffset>>,
    /// Completed deliveries as returned by the parcel API.
    #[serde(default)]
    pub records: Vec<RawDeliveryRecord>,
}
