//! Configuration types for parcel pricing and rider earnings.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DestinationClass, ShipmentType};

const STANDARD_UTC_OFFSET_MINUTES: i32 = 360;

const STANDARD_OFFSET: FixedOffset = match FixedOffset::east_opt(STANDARD_UTC_OFFSET_MINUTES * 60) {
    Some(offset) => offset,
    None => panic!("UTC+6 is a valid offset"),
};

/// Metadata about the courier service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    /// The service's display name.
    pub name: String,
    /// ISO currency code amounts are quoted in.
    pub currency: String,
    /// Offset of the service's local time from UTC, in minutes.
    ///
    /// Period boundaries ("today", "this week") are computed in this offset
    /// when the caller does not supply one.
    pub utc_offset_minutes: i32,
}

impl ServiceMetadata {
    /// Metadata for the standard service (Bangladesh, UTC+6).
    pub fn standard() -> Self {
        Self {
            name: "Standard Courier".to_string(),
            currency: "BDT".to_string(),
            utc_offset_minutes: STANDARD_UTC_OFFSET_MINUTES,
        }
    }

    /// Returns the configured offset as a chrono [`FixedOffset`].
    pub fn timezone(&self) -> EngineResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            EngineError::InvalidConfig {
                field: "utc_offset_minutes".to_string(),
                message: format!("{} is not a valid UTC offset", self.utc_offset_minutes),
            }
        })
    }
}

/// Base costs for one shipment type, by destination class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRates {
    /// Base cost within the same district.
    pub same_district: Decimal,
    /// Base cost to another district.
    pub outside_district: Decimal,
}

impl ZoneRates {
    /// Returns the rate for a destination class.
    pub fn for_destination(&self, destination: DestinationClass) -> Decimal {
        match destination {
            DestinationClass::SameDistrict => self.same_district,
            DestinationClass::OutsideDistrict => self.outside_district,
        }
    }
}

/// The delivery price schedule.
///
/// # Example
///
/// ```
/// use courier_engine::config::Tariff;
/// use courier_engine::models::{DestinationClass, ShipmentType};
/// use rust_decimal::Decimal;
///
/// let tariff = Tariff::standard();
/// assert_eq!(
///     tariff.base_cost(ShipmentType::Document, DestinationClass::OutsideDistrict),
///     Decimal::from(80)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    /// Flat rates for documents.
    pub document: ZoneRates,
    /// Base rates for non-documents.
    pub non_document: ZoneRates,
    /// Non-document weight included in the base rate, in kilograms.
    pub weight_threshold_kg: Decimal,
    /// Charge per kilogram above the threshold.
    pub per_kg_excess: Decimal,
    /// Flat surcharge for over-threshold parcels leaving the district.
    pub outside_district_surcharge: Decimal,
}

impl Tariff {
    /// The standard schedule: documents 60/80, non-documents 110/150,
    /// 3 kg included, 40 per extra kilogram, 40 outside-district surcharge.
    pub fn standard() -> Self {
        Self {
            document: ZoneRates {
                same_district: Decimal::from(60),
                outside_district: Decimal::from(80),
            },
            non_document: ZoneRates {
                same_district: Decimal::from(110),
                outside_district: Decimal::from(150),
            },
            weight_threshold_kg: Decimal::from(3),
            per_kg_excess: Decimal::from(40),
            outside_district_surcharge: Decimal::from(40),
        }
    }

    /// Returns the tier base cost for a shipment type and destination.
    pub fn base_cost(&self, shipment: ShipmentType, destination: DestinationClass) -> Decimal {
        match shipment {
            ShipmentType::Document => self.document.for_destination(destination),
            ShipmentType::NonDocument => self.non_document.for_destination(destination),
        }
    }

    /// Checks every amount is non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("document.same_district", self.document.same_district),
            ("document.outside_district", self.document.outside_district),
            ("non_document.same_district", self.non_document.same_district),
            ("non_document.outside_district", self.non_document.outside_district),
            ("weight_threshold_kg", self.weight_threshold_kg),
            ("per_kg_excess", self.per_kg_excess),
            ("outside_district_surcharge", self.outside_district_surcharge),
        ];

        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} must not be negative", amount),
                });
            }
        }
        Ok(())
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::standard()
    }
}

/// The rider's share of each delivery's cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsPolicy {
    /// Share when sender and receiver centers are the same.
    pub intra_hub_share: Decimal,
    /// Share when the parcel crossed hubs.
    pub inter_hub_share: Decimal,
}

impl EarningsPolicy {
    /// The standard policy: 80% intra-hub, 30% inter-hub.
    pub fn standard() -> Self {
        Self {
            intra_hub_share: Decimal::new(8, 1),
            inter_hub_share: Decimal::new(3, 1),
        }
    }

    /// Checks both shares lie within 0..=1.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, share) in [
            ("intra_hub_share", self.intra_hub_share),
            ("inter_hub_share", self.inter_hub_share),
        ] {
            if share < Decimal::ZERO || share > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} must be between 0 and 1", share),
                });
            }
        }
        Ok(())
    }
}

impl Default for EarningsPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// The complete service configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    metadata: ServiceMetadata,
    timezone: FixedOffset,
    tariff: Tariff,
    earnings: EarningsPolicy,
}

impl ServiceConfig {
    /// Creates a new ServiceConfig, validating every part.
    pub fn new(
        metadata: ServiceMetadata,
        tariff: Tariff,
        earnings: EarningsPolicy,
    ) -> EngineResult<Self> {
        let timezone = metadata.timezone()?;
        tariff.validate()?;
        earnings.validate()?;

        Ok(Self {
            metadata,
            timezone,
            tariff,
            earnings,
        })
    }

    /// The built-in standard configuration.
    pub fn standard() -> Self {
        Self {
            metadata: ServiceMetadata::standard(),
            timezone: STANDARD_OFFSET,
            tariff: Tariff::standard(),
            earnings: EarningsPolicy::standard(),
        }
    }

    /// Returns the service metadata.
    pub fn service(&self) -> &ServiceMetadata {
        &self.metadata
    }

    /// Returns the service's local UTC offset.
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Returns the price schedule.
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Returns the rider earnings policy.
    pub fn earnings(&self) -> &EarningsPolicy {
        &self.earnings
    }
}
