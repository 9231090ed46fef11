//! Delivery record models.
//!
//! A [`DeliveryRecord`] is a completed delivery as the earnings aggregator
//! sees it. Records arrive from the parcel API in a looser shape,
//! [`RawDeliveryRecord`], which is validated before use.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Naive timestamp layouts accepted for `delivered_at`, tried in order.
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Whether the rider's share of a delivery has been paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashoutStatus {
    /// The share has been paid to the rider.
    CashedOut,
    /// The share is still owed to the rider.
    #[default]
    Pending,
}

impl CashoutStatus {
    /// Maps the API's free-form status string.
    ///
    /// Only `"cashed_out"` counts as paid; anything else is still pending.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("cashed_out") => CashoutStatus::CashedOut,
            _ => CashoutStatus::Pending,
        }
    }
}

/// A completed delivery, read-only input to the earnings aggregator.
///
/// # Example
///
/// ```
/// use courier_engine::models::{CashoutStatus, DeliveryRecord};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let record = DeliveryRecord {
///     parcel_id: Some("parcel_001".to_string()),
///     cost: Decimal::from(150),
///     sender_center: "Dhaka".to_string(),
///     receiver_center: "Dhaka".to_string(),
///     delivered_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
///     cashout_status: CashoutStatus::Pending,
/// };
/// assert!(record.is_intra_hub());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Identifier of the delivered parcel, when known.
    #[serde(default)]
    pub parcel_id: Option<String>,
    /// The price charged for the parcel.
    pub cost: Decimal,
    /// Facility the parcel was sent from.
    pub sender_center: String,
    /// Facility the parcel was delivered through.
    pub receiver_center: String,
    /// When the parcel was delivered.
    pub delivered_at: DateTime<Utc>,
    /// Whether the rider's share has been paid out.
    #[serde(default)]
    pub cashout_status: CashoutStatus,
}

impl DeliveryRecord {
    /// Returns true when the parcel never left its hub.
    pub fn is_intra_hub(&self) -> bool {
        self.sender_center == self.receiver_center
    }
}

/// A delivery record exactly as the parcel API returns it.
///
/// Every field is optional and `cost` may be a number or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDeliveryRecord {
    /// Parcel identifier (`_id` on the wire).
    #[serde(default, alias = "_id")]
    pub parcel_id: Option<String>,
    /// The charged price.
    #[serde(default)]
    pub cost: Option<serde_json::Value>,
    /// Sending facility.
    #[serde(default)]
    pub sender_center: Option<String>,
    /// Receiving facility.
    #[serde(default)]
    pub receiver_center: Option<String>,
    /// Delivery timestamp.
    #[serde(default)]
    pub delivered_at: Option<String>,
    /// Cashout status string.
    #[serde(default)]
    pub cashout_status: Option<String>,
}

impl RawDeliveryRecord {
    /// Validates this record into a [`DeliveryRecord`].
    ///
    /// Timestamps without an offset are read as local time in `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedRecord`] when `cost` is missing,
    /// non-numeric or negative, when either center is missing, or when
    /// `delivered_at` is missing or cannot be parsed.
    pub fn into_record(self, index: usize, offset: &FixedOffset) -> EngineResult<DeliveryRecord> {
        let cost = parse_cost(index, self.cost.as_ref())?;

        let sender_center = self
            .sender_center
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| EngineError::malformed_record(index, "missing sender_center"))?;
        let receiver_center = self
            .receiver_center
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| EngineError::malformed_record(index, "missing receiver_center"))?;

        let raw_delivered_at = self
            .delivered_at
            .ok_or_else(|| EngineError::malformed_record(index, "missing delivered_at"))?;
        let delivered_at = parse_timestamp(&raw_delivered_at, offset).ok_or_else(|| {
            EngineError::malformed_record(
                index,
                format!("unparsable delivered_at '{}'", raw_delivered_at),
            )
        })?;

        Ok(DeliveryRecord {
            parcel_id: self.parcel_id,
            cost,
            sender_center,
            receiver_center,
            delivered_at,
            cashout_status: CashoutStatus::from_wire(self.cashout_status.as_deref()),
        })
    }
}

fn parse_cost(index: usize, value: Option<&serde_json::Value>) -> EngineResult<Decimal> {
    let text = match value {
        None | Some(serde_json::Value::Null) => {
            return Err(EngineError::malformed_record(index, "missing cost"));
        }
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(other) => {
            return Err(EngineError::malformed_record(
                index,
                format!("cost must be a number, got {}", other),
            ));
        }
    };

    let cost = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            EngineError::malformed_record(index, format!("cost '{}' is not a number", text))
        })?;

    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(EngineError::malformed_record(
            index,
            format!("cost {} is negative", cost),
        ));
    }

    Ok(cost)
}

/// Parses an RFC 3339 timestamp, or a naive one read in `offset`.
pub(crate) fn parse_timestamp(raw: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    naive
        .and_local_timezone(*offset)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
