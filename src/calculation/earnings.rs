//! Rider earnings aggregation.
//!
//! This module computes each delivery's rider share and folds a list of
//! completed deliveries into an [`EarningsSummary`].

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::EarningsPolicy;
use crate::error::EngineError;
use crate::models::{
    CashoutStatus, DeliveryRecord, EarningsSummary, RawDeliveryRecord, SkippedRecord,
};

use super::period::{PeriodMembership, PeriodStarts};

/// Returns the rider's share of one delivery.
///
/// Intra-hub deliveries (same sender and receiver center) earn
/// `intra_hub_share` of the cost; inter-hub deliveries earn
/// `inter_hub_share`.
///
/// # Examples
///
/// ```
/// use courier_engine::calculation::calculate_earning;
/// use courier_engine::config::EarningsPolicy;
/// use courier_engine::models::{CashoutStatus, DeliveryRecord};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let record = DeliveryRecord {
///     parcel_id: None,
///     cost: Decimal::from(100),
///     sender_center: "Dhaka".to_string(),
///     receiver_center: "Khulna".to_string(),
///     delivered_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
///     cashout_status: CashoutStatus::Pending,
/// };
///
/// assert_eq!(calculate_earning(&record, &EarningsPolicy::standard()), Decimal::from(30));
/// ```
///
/// # Panics
///
/// Panics if the product overflows, which needs a share above 1 that
/// [`EarningsPolicy::validate`] would reject.
pub fn calculate_earning(record: &DeliveryRecord, policy: &EarningsPolicy) -> Decimal {
    record.cost * share_for(record, policy)
}

fn share_for(record: &DeliveryRecord, policy: &EarningsPolicy) -> Decimal {
    if record.is_intra_hub() {
        policy.intra_hub_share
    } else {
        policy.inter_hub_share
    }
}

/// Aggregates validated delivery records into an earnings summary.
///
/// Every record contributes to `total` and to exactly one of
/// `total_cashed_out` / `total_pending`. Period buckets are filled
/// independently using [`PeriodStarts::at`] on `now`.
///
/// A record whose earning cannot be added without overflowing a total is
/// left out and listed in [`EarningsSummary::skipped_records`].
///
/// # Examples
///
/// ```
/// use courier_engine::calculation::summarize_earnings;
/// use courier_engine::config::EarningsPolicy;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// let now = DateTime::parse_from_rfc3339("2026-01-15T15:00:00+06:00").unwrap();
/// let summary = summarize_earnings(&[], now, &EarningsPolicy::standard());
///
/// assert_eq!(summary.total, Decimal::ZERO);
/// assert_eq!(summary.delivery_count, 0);
/// ```
pub fn summarize_earnings(
    records: &[DeliveryRecord],
    now: DateTime<FixedOffset>,
    policy: &EarningsPolicy,
) -> EarningsSummary {
    aggregate(records.iter().enumerate(), now, policy)
}

fn aggregate<'a>(
    records: impl IntoIterator<Item = (usize, &'a DeliveryRecord)>,
    now: DateTime<FixedOffset>,
    policy: &EarningsPolicy,
) -> EarningsSummary {
    let starts = PeriodStarts::at(now);
    let mut summary = EarningsSummary::default();

    for (index, record) in records {
        let membership = starts.membership(record.delivered_at);
        let added = record
            .cost
            .checked_mul(share_for(record, policy))
            .and_then(|earning| add_earning(&mut summary, earning, record.cashout_status, membership));

        if added.is_some() {
            summary.delivery_count += 1;
            continue;
        }

        let err = EngineError::malformed_record(
            index,
            format!("earning on cost {} overflows the summary totals", record.cost),
        );
        warn!(index, parcel_id = ?record.parcel_id, error = %err, "Skipping delivery record");
        summary.skipped_records.push(SkippedRecord {
            index,
            parcel_id: record.parcel_id.clone(),
            reason: skip_reason(err),
        });
    }

    fill_ratios(&mut summary);

    debug!(
        deliveries = summary.delivery_count,
        total = %summary.total,
        pending = %summary.total_pending,
        "Summarized earnings"
    );

    summary
}

/// Validates raw API records and aggregates the usable ones.
///
/// Records that cannot be validated are skipped, logged and listed in
/// [`EarningsSummary::skipped_records`]; the rest are aggregated as by
/// [`summarize_earnings`]. Naive `delivered_at` values are read in `now`'s
/// offset.
pub fn summarize_raw_records(
    raw_records: Vec<RawDeliveryRecord>,
    now: DateTime<FixedOffset>,
    policy: &EarningsPolicy,
) -> EarningsSummary {
    let offset = *now.offset();
    let mut records = Vec::with_capacity(raw_records.len());
    let mut skipped = Vec::new();

    for (index, raw) in raw_records.into_iter().enumerate() {
        let parcel_id = raw.parcel_id.clone();
        match raw.into_record(index, &offset) {
            Ok(record) => records.push((index, record)),
            Err(err) => {
                warn!(index, parcel_id = ?parcel_id, error = %err, "Skipping malformed delivery record");
                skipped.push(SkippedRecord {
                    index,
                    parcel_id,
                    reason: skip_reason(err),
                });
            }
        }
    }

    let mut summary = aggregate(records.iter().map(|(index, record)| (*index, record)), now, policy);
    summary.skipped_records.extend(skipped);
    summary.skipped_records.sort_by_key(|skipped| skipped.index);
    summary
}

/// Adds one earning to the running totals, or leaves them untouched if any
/// affected total would overflow.
fn add_earning(
    summary: &mut EarningsSummary,
    earning: Decimal,
    status: CashoutStatus,
    membership: PeriodMembership,
) -> Option<()> {
    let add_if = |sum: Decimal, counted: bool| {
        if counted {
            sum.checked_add(earning)
        } else {
            Some(sum)
        }
    };

    let total = summary.total.checked_add(earning)?;
    let cashed_out = add_if(summary.total_cashed_out, status == CashoutStatus::CashedOut)?;
    let pending = add_if(summary.total_pending, status == CashoutStatus::Pending)?;
    let today = add_if(summary.today, membership.today)?;
    let this_week = add_if(summary.this_week, membership.this_week)?;
    let this_month = add_if(summary.this_month, membership.this_month)?;
    let this_year = add_if(summary.this_year, membership.this_year)?;

    summary.total = total;
    summary.total_cashed_out = cashed_out;
    summary.total_pending = pending;
    summary.today = today;
    summary.this_week = this_week;
    summary.this_month = this_month;
    summary.this_year = this_year;
    Some(())
}

fn skip_reason(err: EngineError) -> String {
    match err {
        EngineError::MalformedRecord { message, .. } => message,
        other => other.to_string(),
    }
}

fn fill_ratios(summary: &mut EarningsSummary) {
    if summary.delivery_count > 0 {
        summary.average_per_delivery =
            (summary.total / Decimal::from(summary.delivery_count)).round_dp(2);
    }

    if !summary.total.is_zero() {
        let hundred = Decimal::ONE_HUNDRED;
        summary.cashout_rate = (summary.total_cashed_out / summary.total * hundred).round_dp(1);
        summary.pending_rate = (summary.total_pending / summary.total * hundred).round_dp(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        // Wednesday
        at("2026-03-18T15:00:00+06:00")
    }

    fn record(
        cost: &str,
        sender: &str,
        receiver: &str,
        delivered_at: &str,
        status: CashoutStatus,
    ) -> DeliveryRecord {
        DeliveryRecord {
            parcel_id: None,
            cost: dec(cost),
            sender_center: sender.to_string(),
            receiver_center: receiver.to_string(),
            delivered_at: at(delivered_at).with_timezone(&Utc),
            cashout_status: status,
        }
    }

    /// ER-001: intra-hub share
    #[test]
    fn test_intra_hub_earning_is_80_percent() {
        let r = record("100", "Dhaka", "Dhaka", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending);
        assert_eq!(calculate_earning(&r, &EarningsPolicy::standard()), dec("80"));
    }

    /// ER-002: inter-hub share
    #[test]
    fn test_inter_hub_earning_is_30_percent() {
        let r = record("100", "Dhaka", "Rajshahi", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending);
        assert_eq!(calculate_earning(&r, &EarningsPolicy::standard()), dec("30"));
    }

    /// ER-003: empty input
    #[test]
    fn test_empty_records_yield_zero_summary() {
        let summary = summarize_earnings(&[], now(), &EarningsPolicy::standard());
        assert_eq!(summary, EarningsSummary::default());
    }

    /// ER-004: status partition
    #[test]
    fn test_status_totals_partition_total() {
        let records = vec![
            record("100", "A", "A", "2026-03-18T10:00:00+06:00", CashoutStatus::CashedOut),
            record("150", "A", "B", "2026-03-10T10:00:00+06:00", CashoutStatus::Pending),
            record("60", "B", "B", "2025-11-02T10:00:00+06:00", CashoutStatus::Pending),
        ];
        let summary = summarize_earnings(&records, now(), &EarningsPolicy::standard());

        // 80 + 45 + 48
        assert_eq!(summary.total, dec("173"));
        assert_eq!(summary.total_cashed_out, dec("80"));
        assert_eq!(summary.total_pending, dec("93"));
        assert_eq!(summary.total, summary.total_cashed_out + summary.total_pending);
    }

    /// ER-005: period buckets overlap
    #[test]
    fn test_record_from_this_morning_counts_in_every_bucket() {
        let records = vec![record(
            "100",
            "A",
            "A",
            "2026-03-18T08:00:00+06:00",
            CashoutStatus::Pending,
        )];
        let summary = summarize_earnings(&records, now(), &EarningsPolicy::standard());

        assert_eq!(summary.today, dec("80"));
        assert_eq!(summary.this_week, dec("80"));
        assert_eq!(summary.this_month, dec("80"));
        assert_eq!(summary.this_year, dec("80"));
    }

    /// ER-006: buckets by age
    #[test]
    fn test_buckets_by_delivery_age() {
        let records = vec![
            // today
            record("100", "A", "A", "2026-03-18T01:00:00+06:00", CashoutStatus::Pending),
            // Monday this week
            record("100", "A", "B", "2026-03-16T12:00:00+06:00", CashoutStatus::Pending),
            // earlier this month
            record("200", "A", "A", "2026-03-02T12:00:00+06:00", CashoutStatus::Pending),
            // earlier this year
            record("50", "A", "A", "2026-02-14T12:00:00+06:00", CashoutStatus::Pending),
            // last year
            record("1000", "A", "A", "2025-12-31T23:59:59+06:00", CashoutStatus::Pending),
        ];
        let summary = summarize_earnings(&records, now(), &EarningsPolicy::standard());

        assert_eq!(summary.today, dec("80"));
        assert_eq!(summary.this_week, dec("110"));
        assert_eq!(summary.this_month, dec("270"));
        assert_eq!(summary.this_year, dec("310"));
        assert_eq!(summary.total, dec("1110"));
    }

    #[test]
    fn test_ratios_and_average() {
        let records = vec![
            record("100", "A", "A", "2026-03-18T10:00:00+06:00", CashoutStatus::CashedOut),
            record("100", "A", "B", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending),
            record("100", "A", "B", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending),
        ];
        let summary = summarize_earnings(&records, now(), &EarningsPolicy::standard());

        // total 140 over 3 deliveries
        assert_eq!(summary.delivery_count, 3);
        assert_eq!(summary.average_per_delivery, dec("46.67"));
        // 80 / 140 = 57.14%, 60 / 140 = 42.86%
        assert_eq!(summary.cashout_rate, dec("57.1"));
        assert_eq!(summary.pending_rate, dec("42.9"));
    }

    #[test]
    fn test_zero_cost_records_leave_rates_zero() {
        let records = vec![record(
            "0",
            "A",
            "A",
            "2026-03-18T10:00:00+06:00",
            CashoutStatus::CashedOut,
        )];
        let summary = summarize_earnings(&records, now(), &EarningsPolicy::standard());

        assert_eq!(summary.delivery_count, 1);
        assert_eq!(summary.cashout_rate, Decimal::ZERO);
        assert_eq!(summary.pending_rate, Decimal::ZERO);
    }

    #[test]
    fn test_raw_records_skip_malformed_and_keep_the_rest() {
        let raw: Vec<RawDeliveryRecord> = serde_json::from_value(json!([
            {
                "_id": "good",
                "cost": 100,
                "sender_center": "A",
                "receiver_center": "A",
                "delivered_at": "2026-03-18T10:00:00+06:00",
                "cashout_status": "cashed_out"
            },
            {
                "_id": "no-cost",
                "sender_center": "A",
                "receiver_center": "A",
                "delivered_at": "2026-03-18T10:00:00+06:00"
            },
            {
                "_id": "bad-date",
                "cost": "150",
                "sender_center": "A",
                "receiver_center": "B",
                "delivered_at": "not a date"
            }
        ]))
        .unwrap();

        let summary = summarize_raw_records(raw, now(), &EarningsPolicy::standard());

        assert_eq!(summary.delivery_count, 1);
        assert_eq!(summary.total, dec("80"));
        assert_eq!(summary.skipped_records.len(), 2);
        assert_eq!(summary.skipped_records[0].index, 1);
        assert_eq!(summary.skipped_records[0].parcel_id.as_deref(), Some("no-cost"));
        assert!(summary.skipped_records[1].reason.contains("not a date"));
    }

    #[test]
    fn test_raw_naive_timestamp_uses_now_offset() {
        let raw: Vec<RawDeliveryRecord> = serde_json::from_value(json!([
            {
                "cost": 100,
                "sender_center": "A",
                "receiver_center": "A",
                "delivered_at": "2026-03-18T00:30:00"
            }
        ]))
        .unwrap();

        let summary = summarize_raw_records(raw, now(), &EarningsPolicy::standard());

        // 00:30 local on the same day is after local midnight
        assert_eq!(summary.today, dec("80"));
    }

    #[test]
    fn test_record_overflowing_totals_is_skipped() {
        let huge = "50000000000000000000000000000";
        let mut records = vec![
            record(huge, "A", "A", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending),
            record(huge, "A", "A", "2026-03-18T11:00:00+06:00", CashoutStatus::Pending),
            record("100", "A", "A", "2026-03-18T12:00:00+06:00", CashoutStatus::CashedOut),
        ];
        records[1].parcel_id = Some("too-much".to_string());

        let summary = summarize_earnings(&records, now(), &EarningsPolicy::standard());

        assert_eq!(summary.delivery_count, 2);
        assert_eq!(summary.total, dec("40000000000000000000000000080"));
        assert_eq!(summary.total, summary.total_cashed_out + summary.total_pending);
        assert_eq!(summary.skipped_records.len(), 1);
        assert_eq!(summary.skipped_records[0].index, 1);
        assert_eq!(summary.skipped_records[0].parcel_id.as_deref(), Some("too-much"));
        assert!(summary.skipped_records[0].reason.contains("overflows"));
    }

    #[test]
    fn test_raw_overflow_and_malformed_skips_are_reported_in_order() {
        let raw: Vec<RawDeliveryRecord> = serde_json::from_value(json!([
            {
                "cost": "50000000000000000000000000000",
                "sender_center": "A",
                "receiver_center": "A",
                "delivered_at": "2026-03-18T10:00:00+06:00"
            },
            {
                "_id": "no-centers",
                "cost": 10,
                "delivered_at": "2026-03-18T10:00:00+06:00"
            },
            {
                "_id": "overflow",
                "cost": "50000000000000000000000000000",
                "sender_center": "A",
                "receiver_center": "A",
                "delivered_at": "2026-03-18T10:00:00+06:00"
            }
        ]))
        .unwrap();

        let summary = summarize_raw_records(raw, now(), &EarningsPolicy::standard());

        assert_eq!(summary.delivery_count, 1);
        let indices: Vec<usize> = summary.skipped_records.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(summary.skipped_records[1].parcel_id.as_deref(), Some("overflow"));
    }

    #[test]
    fn test_custom_policy_shares() {
        let policy = EarningsPolicy {
            intra_hub_share: dec("0.5"),
            inter_hub_share: dec("0.25"),
        };
        let records = vec![
            record("200", "A", "A", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending),
            record("200", "A", "B", "2026-03-18T10:00:00+06:00", CashoutStatus::Pending),
        ];
        let summary = summarize_earnings(&records, now(), &policy);

        assert_eq!(summary.total, dec("150"));
    }
}
