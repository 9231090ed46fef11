//! Core data models for the Courier Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod delivery;
mod earnings_summary;
mod parcel;
mod pricing_result;

pub use delivery::{CashoutStatus, DeliveryRecord, RawDeliveryRecord};
pub use earnings_summary::{EarningsSummary, SkippedRecord};
pub use parcel::{DestinationClass, ParcelPricingRequest, ShipmentType};
pub use pricing_result::{ChargeKind, ChargeLine, PricingResult};

pub(crate) use parcel::parse_weight;
