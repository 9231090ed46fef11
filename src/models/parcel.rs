//! Parcel pricing input types.
//!
//! This module defines the closed set of shipment types and destination
//! classes, and the [`ParcelPricingRequest`] that bundles them with an
//! optional weight.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// What kind of parcel is being shipped.
///
/// # Example
///
/// ```
/// use courier_engine::models::ShipmentType;
///
/// let shipment: ShipmentType = "non-document".parse().unwrap();
/// assert_eq!(shipment, ShipmentType::NonDocument);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentType {
    /// Papers and envelopes. Priced flat, weight is ignored.
    Document,
    /// Anything else. Priced by weight tier.
    #[serde(alias = "non-document")]
    NonDocument,
}

impl ShipmentType {
    /// Returns the canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentType::Document => "document",
            ShipmentType::NonDocument => "non_document",
        }
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentType {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "document" => Ok(ShipmentType::Document),
            "non_document" | "non-document" => Ok(ShipmentType::NonDocument),
            other => Err(EngineError::invalid_input(
                "shipment_type",
                format!("unknown shipment type '{}'", other),
            )),
        }
    }
}

/// Whether the parcel stays inside the sender's district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationClass {
    /// Delivered within the same district.
    #[serde(alias = "same")]
    SameDistrict,
    /// Delivered to another district.
    #[serde(alias = "outside")]
    OutsideDistrict,
}

impl DestinationClass {
    /// Returns the canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationClass::SameDistrict => "same_district",
            DestinationClass::OutsideDistrict => "outside_district",
        }
    }

    /// Returns true for [`DestinationClass::SameDistrict`].
    pub fn is_same_district(&self) -> bool {
        matches!(self, DestinationClass::SameDistrict)
    }

    /// Human-readable label used in cost breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            DestinationClass::SameDistrict => "same district",
            DestinationClass::OutsideDistrict => "outside district",
        }
    }
}

impl fmt::Display for DestinationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationClass {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "same" | "same_district" => Ok(DestinationClass::SameDistrict),
            "outside" | "outside_district" => Ok(DestinationClass::OutsideDistrict),
            other => Err(EngineError::invalid_input(
                "destination_class",
                format!("unknown destination class '{}'", other),
            )),
        }
    }
}

/// A request to price a single parcel.
///
/// `weight_kg` is only consulted for [`ShipmentType::NonDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelPricingRequest {
    /// The kind of parcel.
    pub shipment_type: ShipmentType,
    /// Same or outside district.
    pub destination_class: DestinationClass,
    /// Parcel weight in kilograms.
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
}

impl ParcelPricingRequest {
    /// Parses the loose string form submitted by a pricing form.
    ///
    /// Blank weights are treated as absent. A weight that is present but not
    /// a number is rejected with [`EngineError::InvalidInput`], regardless of
    /// shipment type.
    ///
    /// # Example
    ///
    /// ```
    /// use courier_engine::models::{DestinationClass, ParcelPricingRequest, ShipmentType};
    ///
    /// let request = ParcelPricingRequest::parse("non-document", "outside", Some("4.5")).unwrap();
    /// assert_eq!(request.shipment_type, ShipmentType::NonDocument);
    /// assert_eq!(request.destination_class, DestinationClass::OutsideDistrict);
    /// assert!(request.weight_kg.is_some());
    ///
    /// assert!(ParcelPricingRequest::parse("document", "same", Some("heavy")).is_err());
    /// ```
    pub fn parse(
        shipment_type: &str,
        destination_class: &str,
        weight_kg: Option<&str>,
    ) -> EngineResult<Self> {
        let shipment_type = shipment_type.parse()?;
        let destination_class = destination_class.parse()?;
        let weight_kg = match weight_kg.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_weight(raw)?),
        };

        Ok(Self {
            shipment_type,
            destination_class,
            weight_kg,
        })
    }
}

/// Parses a weight string into a decimal number of kilograms.
pub(crate) fn parse_weight(raw: &str) -> EngineResult<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| {
            EngineError::invalid_input("weight_kg", format!("'{}' is not a number", raw))
        })
}
