//! Calculation logic for the Courier Engine.
//!
//! This module contains the delivery cost calculation, the rider earning
//! share, calendar period boundaries and the earnings aggregation built on
//! top of them.

mod earnings;
mod period;
mod pricing;

pub use earnings::{calculate_earning, summarize_earnings, summarize_raw_records};
pub use period::{PeriodMembership, PeriodStarts};
pub use pricing::{compute_price, compute_price_for};
