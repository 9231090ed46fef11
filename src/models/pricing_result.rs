//! Pricing result models.
//!
//! This module contains the [`PricingResult`] type and the charge lines that
//! make up a delivery cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DestinationClass, ShipmentType};

/// The category of a single charge on a delivery quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    /// The tier base cost.
    Base,
    /// Per-kilogram charge for weight above the threshold.
    ExcessWeight,
    /// Flat surcharge for heavy parcels leaving the district.
    OutsideDistrictSurcharge,
}

/// A single line item on a delivery quote.
///
/// # Example
///
/// ```
/// use courier_engine::models::{ChargeKind, ChargeLine};
/// use rust_decimal::Decimal;
///
/// let line = ChargeLine {
///     kind: ChargeKind::ExcessWeight,
///     description: "40 x 2.0 kg over 3 kg".to_string(),
///     amount: Decimal::from(80),
/// };
/// assert_eq!(line.amount, Decimal::from(80));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// What the charge is for.
    pub kind: ChargeKind,
    /// Human-readable description of the charge.
    pub description: String,
    /// The amount charged.
    pub amount: Decimal,
}

/// The outcome of pricing one parcel.
///
/// `base_cost` is the [`ChargeKind::Base`] line, `extra_cost` is the sum of
/// every other line and `total_cost` is their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// The shipment type that was priced.
    pub shipment_type: ShipmentType,
    /// The destination class that was priced.
    pub destination_class: DestinationClass,
    /// The weight used for pricing, `None` for documents.
    pub weight_kg: Option<Decimal>,
    /// The tier base cost.
    pub base_cost: Decimal,
    /// Weight and district surcharges, zero when none apply.
    pub extra_cost: Decimal,
    /// `base_cost + extra_cost`.
    pub total_cost: Decimal,
    /// Itemised charges in the order they were applied.
    pub charges: Vec<ChargeLine>,
    /// Human-readable explanation of the cost.
    pub breakdown_text: String,
}

impl PricingResult {
    /// Builds a result from its charge lines, deriving the cost fields.
    pub fn from_charges(
        shipment_type: ShipmentType,
        destination_class: DestinationClass,
        weight_kg: Option<Decimal>,
        charges: Vec<ChargeLine>,
        breakdown_text: String,
    ) -> Self {
        let base_cost: Decimal = charges
            .iter()
            .filter(|c| c.kind == ChargeKind::Base)
            .map(|c| c.amount)
            .sum();
        let extra_cost: Decimal = charges
            .iter()
            .filter(|c| c.kind != ChargeKind::Base)
            .map(|c| c.amount)
            .sum();

        Self {
            shipment_type,
            destination_class,
            weight_kg,
            base_cost,
            extra_cost,
            total_cost: base_cost + extra_cost,
            charges,
            breakdown_text,
        }
    }
}
