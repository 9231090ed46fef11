//! Delivery cost calculation.
//!
//! This module prices a single parcel from its shipment type, destination
//! class and weight against a [`Tariff`].

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::Tariff;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ChargeKind, ChargeLine, DestinationClass, ParcelPricingRequest, PricingResult, ShipmentType,
};

/// Computes the delivery cost of one parcel.
///
/// # Rules
///
/// - Documents pay the flat document rate for their destination. Weight is
///   ignored, even when supplied.
/// - Non-documents up to the weight threshold (inclusive) pay the
///   non-document base rate.
/// - Heavier non-documents additionally pay `per_kg_excess` for every
///   kilogram above the threshold, plus `outside_district_surcharge` when
///   leaving the district.
///
/// Amounts are exact decimals and are not rounded.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for a non-document with no weight, a
/// negative weight, or a weight so large its cost cannot be represented.
///
/// # Examples
///
/// ```
/// use courier_engine::calculation::compute_price;
/// use courier_engine::config::Tariff;
/// use courier_engine::models::{DestinationClass, ShipmentType};
/// use rust_decimal::Decimal;
///
/// let result = compute_price(
///     ShipmentType::NonDocument,
///     DestinationClass::OutsideDistrict,
///     Some(Decimal::from(5)),
///     &Tariff::standard(),
/// )
/// .unwrap();
///
/// assert_eq!(result.base_cost, Decimal::from(150));
/// assert_eq!(result.extra_cost, Decimal::from(120));
/// assert_eq!(result.total_cost, Decimal::from(270));
/// ```
pub fn compute_price(
    shipment_type: ShipmentType,
    destination_class: DestinationClass,
    weight_kg: Option<Decimal>,
    tariff: &Tariff,
) -> EngineResult<PricingResult> {
    let result = match shipment_type {
        ShipmentType::Document => price_document(destination_class, tariff),
        ShipmentType::NonDocument => {
            let weight = validate_weight(weight_kg)?;
            price_non_document(destination_class, weight, tariff)?
        }
    };

    debug!(
        shipment_type = %shipment_type,
        destination_class = %destination_class,
        total_cost = %result.total_cost,
        "Priced parcel"
    );

    Ok(result)
}

/// Prices a parsed [`ParcelPricingRequest`].
pub fn compute_price_for(
    request: &ParcelPricingRequest,
    tariff: &Tariff,
) -> EngineResult<PricingResult> {
    compute_price(
        request.shipment_type,
        request.destination_class,
        request.weight_kg,
        tariff,
    )
}

fn validate_weight(weight_kg: Option<Decimal>) -> EngineResult<Decimal> {
    let weight = weight_kg.ok_or_else(|| {
        EngineError::invalid_input("weight_kg", "weight is required for non-document parcels")
    })?;

    if weight < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "weight_kg",
            format!("weight {} must not be negative", weight),
        ));
    }

    Ok(weight)
}

fn price_document(destination: DestinationClass, tariff: &Tariff) -> PricingResult {
    let base = tariff.base_cost(ShipmentType::Document, destination);
    let breakdown = format!("Document delivery, {}.", destination.label());

    PricingResult::from_charges(
        ShipmentType::Document,
        destination,
        None,
        vec![ChargeLine {
            kind: ChargeKind::Base,
            description: breakdown.clone(),
            amount: base,
        }],
        breakdown,
    )
}

fn price_non_document(
    destination: DestinationClass,
    weight: Decimal,
    tariff: &Tariff,
) -> EngineResult<PricingResult> {
    let base = tariff.base_cost(ShipmentType::NonDocument, destination);
    let threshold = tariff.weight_threshold_kg;

    if weight <= threshold {
        let breakdown = format!(
            "Non-document (up to {} kg), {}.",
            threshold.normalize(),
            destination.label()
        );
        return Ok(PricingResult::from_charges(
            ShipmentType::NonDocument,
            destination,
            Some(weight),
            vec![ChargeLine {
                kind: ChargeKind::Base,
                description: breakdown.clone(),
                amount: base,
            }],
            breakdown,
        ));
    }

    let surcharge = if destination.is_same_district() {
        Decimal::ZERO
    } else {
        tariff.outside_district_surcharge
    };
    let excess_kg = weight.checked_sub(threshold).ok_or_else(weight_too_large)?;
    let per_kg_charge = excess_kg
        .checked_mul(tariff.per_kg_excess)
        .ok_or_else(weight_too_large)?;
    // Charge lines are summed again when the result is built
    base.checked_add(per_kg_charge)
        .and_then(|total| total.checked_add(surcharge))
        .ok_or_else(weight_too_large)?;
    let shown_kg = display_kg(excess_kg);

    let tier = format!(
        "Non-document (over {} kg), {}.",
        threshold.normalize(),
        destination.label()
    );
    let mut charges = vec![
        ChargeLine {
            kind: ChargeKind::Base,
            description: tier.clone(),
            amount: base,
        },
        ChargeLine {
            kind: ChargeKind::ExcessWeight,
            description: format!(
                "{} x {} kg over {} kg",
                tariff.per_kg_excess.normalize(),
                shown_kg,
                threshold.normalize()
            ),
            amount: per_kg_charge,
        },
    ];

    let mut breakdown = format!(
        "{}\nExtra charge: {} x {} kg = {}",
        tier,
        tariff.per_kg_excess.normalize(),
        shown_kg,
        per_kg_charge.normalize()
    );

    if !destination.is_same_district() {
        breakdown.push_str(&format!(" + {} (outside district)", surcharge.normalize()));
        charges.push(ChargeLine {
            kind: ChargeKind::OutsideDistrictSurcharge,
            description: "Outside district surcharge".to_string(),
            amount: surcharge,
        });
    }

    Ok(PricingResult::from_charges(
        ShipmentType::NonDocument,
        destination,
        Some(weight),
        charges,
        breakdown,
    ))
}

/// Excess weight to one decimal place, halves rounded away from zero.
fn display_kg(kg: Decimal) -> String {
    format!(
        "{:.1}",
        kg.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn weight_too_large() -> EngineError {
    EngineError::invalid_input("weight_kg", "weight is too large")
}
