//! Calendar period boundaries.
//!
//! This module computes the start of "today", "this week", "this month" and
//! "this year" relative to a reference instant, in that instant's own UTC
//! offset, and classifies delivery timestamps against them.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The four period starts used for earnings buckets.
///
/// Weeks start on Monday.
///
/// # Example
///
/// ```
/// use courier_engine::calculation::PeriodStarts;
/// use chrono::DateTime;
///
/// // Thursday afternoon in Dhaka
/// let now = DateTime::parse_from_rfc3339("2026-01-15T15:00:00+06:00").unwrap();
/// let starts = PeriodStarts::at(now);
///
/// assert_eq!(starts.today.to_rfc3339(), "2026-01-15T00:00:00+06:00");
/// assert_eq!(starts.this_week.to_rfc3339(), "2026-01-12T00:00:00+06:00");
/// assert_eq!(starts.this_month.to_rfc3339(), "2026-01-01T00:00:00+06:00");
/// assert_eq!(starts.this_year.to_rfc3339(), "2026-01-01T00:00:00+06:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStarts {
    /// Local midnight of the current day.
    pub today: DateTime<FixedOffset>,
    /// Midnight of the most recent Monday (today, if today is Monday).
    pub this_week: DateTime<FixedOffset>,
    /// Midnight of the first day of the current month.
    pub this_month: DateTime<FixedOffset>,
    /// Midnight of January 1 of the current year.
    pub this_year: DateTime<FixedOffset>,
}

/// Which period buckets a single timestamp falls into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodMembership {
    /// At or after the start of today.
    pub today: bool,
    /// At or after the start of this week.
    pub this_week: bool,
    /// At or after the start of this month.
    pub this_month: bool,
    /// At or after the start of this year.
    pub this_year: bool,
}

impl PeriodStarts {
    /// Computes the period starts for `now`, in `now`'s offset.
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        let offset = *now.offset();
        let date = now.date_naive();

        let week_start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let month_start = date - Duration::days(i64::from(date.day0()));
        let year_start = date - Duration::days(i64::from(date.ordinal0()));

        Self {
            today: local_midnight(date, offset),
            this_week: local_midnight(week_start, offset),
            this_month: local_midnight(month_start, offset),
            this_year: local_midnight(year_start, offset),
        }
    }

    /// Classifies a delivery timestamp against each period start.
    ///
    /// Each bucket is tested independently with an inclusive comparison; there
    /// is no upper bound, so a timestamp after `now` still matches.
    pub fn membership(&self, delivered_at: DateTime<Utc>) -> PeriodMembership {
        PeriodMembership {
            today: delivered_at >= self.today.with_timezone(&Utc),
            this_week: delivered_at >= self.this_week.with_timezone(&Utc),
            this_month: delivered_at >= self.this_month.with_timezone(&Utc),
            this_year: delivered_at >= self.this_year.with_timezone(&Utc),
        }
    }
}

/// Midnight at the start of `date` in a fixed offset.
fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}
