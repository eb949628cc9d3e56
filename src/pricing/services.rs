//! Boundary services around the pricing engine.
//!
//! Input validation and the exchange-rate policy live here, so the
//! calculators can stay total and side-effect free.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tracing::debug;

use crate::config::PricingSettings;

use super::calculators::{allocate_shared_costs, compute_pricing, trip_financials, Allocation};
use super::models::{CostBreakdown, PricingResult, Trip, TripBooking, TripFinancials, UmrahPackage};
use super::requests::{AllocateSharedCostsRequest, PackageRequest, PricingRequest, TripRequest};

/// Largest magnitude accepted for any amount or rate at the boundary.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// What a zero exchange rate means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroRatePolicy {
    /// Zero is "rate not entered yet"; refuse to price foreign costs with it.
    #[default]
    Reject,
    /// Zero is "no conversion needed"; substitute 1.
    TreatAsOne,
    /// Pass zero through; foreign components convert to zero.
    AsGiven,
}

impl FromStr for ZeroRatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "treat_as_one" => Ok(Self::TreatAsOne),
            "as_given" => Ok(Self::AsGiven),
            other => Err(format!("Unknown zero rate policy: {other}")),
        }
    }
}

/// Pricing validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    InvalidInput { field: String, message: String },
    MissingExchangeRate { currency: String },
    /// A validation error inside one package of a report request
    InPackage {
        package_number: String,
        error: Box<PricingError>,
    },
}

impl PricingError {
    fn invalid(field: &str, message: &str) -> Self {
        PricingError::InvalidInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Stable identifier for API clients
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "invalid_input",
            PricingError::MissingExchangeRate { .. } => "missing_exchange_rate",
            PricingError::InPackage { error, .. } => error.error_type(),
        }
    }
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidInput { field, message } => {
                write!(f, "Invalid value for {}: {}", field, message)
            }
            PricingError::MissingExchangeRate { currency } => {
                write!(f, "Exchange rate for {} is not set", currency)
            }
            PricingError::InPackage {
                package_number,
                error,
            } => write!(f, "Package {}: {}", package_number, error),
        }
    }
}

impl std::error::Error for PricingError {}

fn check_count(field: &str, value: i32, max: u32) -> Result<u32, PricingError> {
    let count =
        u32::try_from(value).map_err(|_| PricingError::invalid(field, "must not be negative"))?;
    if count > max {
        return Err(PricingError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {max}"),
        });
    }
    Ok(count)
}

fn check_amount(field: &str, value: Decimal) -> Result<Decimal, PricingError> {
    if value < Decimal::ZERO {
        return Err(PricingError::invalid(field, "must not be negative"));
    }
    check_magnitude(field, value)
}

fn check_magnitude(field: &str, value: Decimal) -> Result<Decimal, PricingError> {
    if value.abs() > MAX_AMOUNT {
        return Err(PricingError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {MAX_AMOUNT} in magnitude"),
        });
    }
    Ok(value)
}

/// Resolve the rate to use for conversion under the given policy.
///
/// Non-zero rates are returned unchanged. `has_foreign_costs` tells the
/// `Reject` policy whether a zero rate would actually affect the result.
pub fn effective_exchange_rate(
    rate: Decimal,
    policy: ZeroRatePolicy,
    has_foreign_costs: bool,
    currency: &str,
) -> Result<Decimal, PricingError> {
    if !rate.is_zero() {
        return Ok(rate);
    }

    match policy {
        ZeroRatePolicy::Reject if has_foreign_costs => Err(PricingError::MissingExchangeRate {
            currency: currency.to_string(),
        }),
        ZeroRatePolicy::TreatAsOne => Ok(Decimal::ONE),
        ZeroRatePolicy::Reject | ZeroRatePolicy::AsGiven => Ok(Decimal::ZERO),
    }
}

/// Convert a single foreign-currency amount to the home currency.
///
/// Returns the rate actually applied alongside the converted amount.
pub fn convert_to_home(
    amount: Decimal,
    rate: Decimal,
    settings: &PricingSettings,
) -> Result<(Decimal, Decimal), PricingError> {
    check_magnitude("amount", amount)?;
    check_amount("exchange_rate", rate)?;

    let rate = effective_exchange_rate(
        rate,
        settings.zero_rate_policy,
        !amount.is_zero(),
        &settings.foreign_currency,
    )?;
    Ok((rate, amount * rate))
}

/// Validate raw request fields and build a `CostBreakdown`.
///
/// Counts must be non-negative and at most `max_persons`. Cost components and
/// the rate must be non-negative and at most `MAX_AMOUNT`. The profit margin
/// may be negative (loss-leader pricing) within the same magnitude. A missing
/// exchange rate falls back to the configured default.
pub fn validate_breakdown(
    request: &PricingRequest,
    settings: &PricingSettings,
) -> Result<CostBreakdown, PricingError> {
    let number_of_persons =
        check_count("number_of_persons", request.number_of_persons, settings.max_persons)?;
    let bus_count = check_count("bus_count", request.bus_count, settings.max_persons)?;

    let rate = check_amount(
        "exchange_rate",
        request.exchange_rate.unwrap_or(settings.default_exchange_rate),
    )?;

    let mut breakdown = CostBreakdown {
        exchange_rate: rate,
        number_of_persons,
        visa_foreign: check_amount("visa_foreign", request.visa_foreign)?,
        accommodation_total: check_amount("accommodation_total", request.accommodation_total)?,
        barcode_price: check_amount("barcode_price", request.barcode_price)?,
        flight_price: check_amount("flight_price", request.flight_price)?,
        fast_train_foreign: check_amount("fast_train_foreign", request.fast_train_foreign)?,
        other_expenses: check_amount("other_expenses", request.other_expenses)?,
        commission: check_amount("commission", request.commission)?,
        bus_count,
        bus_price_foreign: check_amount("bus_price_foreign", request.bus_price_foreign)?,
        gifts_price: check_amount("gifts_price", request.gifts_price)?,
        supervisor_expenses_foreign: check_amount(
            "supervisor_expenses_foreign",
            request.supervisor_expenses_foreign,
        )?,
        supervisor_barcode_price: check_amount(
            "supervisor_barcode_price",
            request.supervisor_barcode_price,
        )?,
        profit_margin: check_magnitude("profit_margin", request.profit_margin)?,
    };

    breakdown.exchange_rate = effective_exchange_rate(
        rate,
        settings.zero_rate_policy,
        breakdown.has_foreign_costs(),
        &settings.foreign_currency,
    )?;

    Ok(breakdown)
}

/// Validate a request and run the engine on it.
pub fn price_package(
    request: &PricingRequest,
    settings: &PricingSettings,
) -> Result<(CostBreakdown, PricingResult), PricingError> {
    let breakdown = validate_breakdown(request, settings)?;
    let result = compute_pricing(&breakdown);

    debug!(
        persons = breakdown.number_of_persons,
        rate = %breakdown.exchange_rate,
        per_person_cost = %result.per_person_cost,
        net_profit = %result.net_profit,
        "Package priced"
    );

    Ok((breakdown, result))
}

/// Validate one package of a report request.
///
/// Errors are tagged with the package number so the caller can find the
/// offending entry.
pub fn validate_package(
    request: &PackageRequest,
    settings: &PricingSettings,
) -> Result<UmrahPackage, PricingError> {
    let costs =
        validate_breakdown(&request.costs, settings).map_err(|error| PricingError::InPackage {
            package_number: request.package_number.clone(),
            error: Box::new(error),
        })?;

    Ok(UmrahPackage {
        id: request.id,
        package_number: request.package_number.clone(),
        trip_name: request.trip_name.clone(),
        date: request.date,
        room_type: request.room_type,
        status: request.status,
        is_active: request.is_active,
        costs,
    })
}

pub fn validate_packages(
    requests: &[PackageRequest],
    settings: &PricingSettings,
) -> Result<Vec<UmrahPackage>, PricingError> {
    requests
        .iter()
        .map(|request| validate_package(request, settings))
        .collect()
}

/// Check a booking's persons and amounts. Fields are reported as
/// `bookings[i].<field>`.
pub fn validate_bookings(
    bookings: &[TripBooking],
    settings: &PricingSettings,
) -> Result<(), PricingError> {
    for (i, booking) in bookings.iter().enumerate() {
        let field = |name: &str| format!("bookings[{i}].{name}");

        if booking.number_of_persons > settings.max_persons {
            return Err(PricingError::InvalidInput {
                field: field("number_of_persons"),
                message: format!("must not exceed {}", settings.max_persons),
            });
        }
        check_amount(&field("price_per_person"), booking.price_per_person)?;
        check_amount(&field("paid_amount"), booking.paid_amount)?;
    }
    Ok(())
}

/// Validate a trip request and build a `Trip`.
///
/// Booked seats may not exceed capacity. The exchange rate follows the same
/// default and zero-rate policy as package pricing.
pub fn validate_trip(
    request: &TripRequest,
    settings: &PricingSettings,
) -> Result<Trip, PricingError> {
    let total_capacity =
        check_count("total_capacity", request.total_capacity, settings.max_persons)?;
    let booked_seats = check_count("booked_seats", request.booked_seats, settings.max_persons)?;
    if booked_seats > total_capacity {
        return Err(PricingError::invalid("booked_seats", "must not exceed total_capacity"));
    }

    let selling_price_per_person =
        check_amount("selling_price_per_person", request.selling_price_per_person)?;
    let total_cost = check_amount("total_cost", request.total_cost)?;
    let rate = check_amount(
        "exchange_rate",
        request.exchange_rate.unwrap_or(settings.default_exchange_rate),
    )?;
    let exchange_rate = effective_exchange_rate(
        rate,
        settings.zero_rate_policy,
        !selling_price_per_person.is_zero(),
        &settings.foreign_currency,
    )?;

    Ok(Trip {
        trip_number: request.trip_number.clone().unwrap_or_default(),
        total_capacity,
        booked_seats,
        selling_price_per_person,
        exchange_rate,
        total_cost,
    })
}

/// Validate a trip request and compute its figures.
pub fn price_trip(
    request: &TripRequest,
    settings: &PricingSettings,
) -> Result<(Trip, TripFinancials), PricingError> {
    let trip = validate_trip(request, settings)?;
    let figures = trip_financials(&trip);

    debug!(
        trip = %trip.trip_number,
        capacity = trip.total_capacity,
        booked = trip.booked_seats,
        net_profit = %figures.net_profit,
        "Trip priced"
    );

    Ok((trip, figures))
}

/// Validate an allocation request and split the shared total.
pub fn allocate_request(
    request: &AllocateSharedCostsRequest,
    settings: &PricingSettings,
) -> Result<Allocation, PricingError> {
    let person_count = check_count("person_count", request.person_count, settings.max_persons)?;
    let shared_total = check_magnitude("shared_total", request.shared_total)?;

    Ok(allocate_shared_costs(shared_total, person_count))
}

/// Next sequential package number for a year, e.g. `UMR-2025-0007`.
///
/// `last` is the highest existing number. It is ignored unless it carries the
/// same year prefix and a numeric suffix.
pub fn next_package_number(year: i32, last: Option<&str>) -> String {
    let prefix = format!("UMR-{year}-");
    let next = last
        .and_then(|number| number.strip_prefix(prefix.as_str()))
        .and_then(|suffix| suffix.parse::<u64>().ok())
        .map_or(1, |n| n.saturating_add(1));

    format!("{prefix}{next:04}")
}
