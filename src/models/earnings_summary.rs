//! Earnings summary models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw delivery record that was left out of an earnings summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position of the record in the submitted list.
    pub index: usize,
    /// Parcel identifier, when the record carried one.
    pub parcel_id: Option<String>,
    /// Why the record was rejected.
    pub reason: String,
}

/// A rider's earnings, derived fresh from a list of completed deliveries.
///
/// The status totals always partition `total`. The period buckets overlap:
/// a delivery made this morning counts toward all four of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSummary {
    /// Sum of every record's earning.
    pub total: Decimal,
    /// Earnings already paid out.
    pub total_cashed_out: Decimal,
    /// Earnings not yet paid out.
    pub total_pending: Decimal,
    /// Earnings delivered since local midnight.
    pub today: Decimal,
    /// Earnings delivered since Monday 00:00.
    pub this_week: Decimal,
    /// Earnings delivered since the first of the month.
    pub this_month: Decimal,
    /// Earnings delivered since January 1.
    pub this_year: Decimal,
    /// Number of records aggregated.
    pub delivery_count: usize,
    /// `total / delivery_count`, zero when there are no deliveries.
    pub average_per_delivery: Decimal,
    /// Share of `total` already cashed out, in percent (one decimal place).
    pub cashout_rate: Decimal,
    /// Share of `total` still pending, in percent (one decimal place).
    pub pending_rate: Decimal,
    /// Records left out: malformed input, or an earning that would overflow
    /// the totals.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<SkippedRecord>,
}
