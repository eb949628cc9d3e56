//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state.
//! Values carry full decimal precision; rounding is left to callers.
//! Products and sums saturate at `Decimal::MIN`/`Decimal::MAX` instead of
//! panicking, so every function here is total.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::{ConvertedCosts, CostBreakdown, PricingResult, Trip, TripFinancials};

/// Smallest currency unit handed out by `allocate_shared_costs`
const MINOR_UNIT: Decimal = dec!(0.01);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use travel_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// `part / whole * 100`, or zero when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        // Quotient out of range; whole is positive so the sign follows part
        None if part.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

fn sum(amounts: &[Decimal]) -> Decimal {
    amounts
        .iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(*amount))
}

/// Convert foreign-currency components and sum the two cost pools.
///
/// The exchange rate is applied as given; a zero rate zeroes every converted
/// component.
pub fn convert_costs(breakdown: &CostBreakdown) -> ConvertedCosts {
    let rate = breakdown.exchange_rate;

    let visa_home = breakdown.visa_foreign.saturating_mul(rate);
    let fast_train_home = breakdown.fast_train_foreign.saturating_mul(rate);
    let bus_home = breakdown
        .bus_price_foreign
        .saturating_mul(rate)
        .saturating_mul(Decimal::from(breakdown.bus_count));
    let supervisor_expenses_home = breakdown.supervisor_expenses_foreign.saturating_mul(rate);

    let direct_per_person = sum(&[
        visa_home,
        breakdown.accommodation_total,
        breakdown.barcode_price,
        breakdown.flight_price,
        fast_train_home,
        breakdown.other_expenses,
        breakdown.commission,
    ]);

    let shared_total = sum(&[
        bus_home,
        breakdown.gifts_price,
        supervisor_expenses_home,
        breakdown.supervisor_barcode_price,
    ]);

    ConvertedCosts {
        visa_home,
        fast_train_home,
        bus_home,
        supervisor_expenses_home,
        direct_per_person,
        shared_total,
    }
}

/// Compute per-person cost, selling price, revenue and profit for a package.
///
/// Total over its input: every division is guarded, so zero persons or zero
/// revenue produce zeros instead of errors. Negative inputs are not rejected
/// here; see `services::validate_breakdown`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use travel_pricing::pricing::{compute_pricing, CostBreakdown};
///
/// let breakdown = CostBreakdown {
///     number_of_persons: 2,
///     exchange_rate: dec!(13.5),
///     visa_foreign: dec!(100),
///     ..Default::default()
/// };
/// let result = compute_pricing(&breakdown);
/// assert_eq!(result.per_person_cost, dec!(1350));
/// assert_eq!(result.total_revenue, dec!(2700));
/// ```
pub fn compute_pricing(breakdown: &CostBreakdown) -> PricingResult {
    let converted = convert_costs(breakdown);
    let persons = Decimal::from(breakdown.number_of_persons);

    // Shared pool is only allocated when there is someone to allocate to
    let per_person_cost = if breakdown.number_of_persons > 0 {
        converted
            .direct_per_person
            .saturating_add(converted.shared_total / persons)
    } else {
        converted.direct_per_person
    };

    let selling_price_per_person = per_person_cost.saturating_add(breakdown.profit_margin);
    let total_revenue = selling_price_per_person.saturating_mul(persons);
    let total_cost = per_person_cost.saturating_mul(persons);
    let net_profit = total_revenue.saturating_sub(total_cost);

    let profit_margin_percent = percent_of(net_profit, total_revenue);

    let net_profit_per_person = if breakdown.number_of_persons > 0 {
        net_profit / persons
    } else {
        Decimal::ZERO
    };

    PricingResult {
        per_person_cost,
        selling_price_per_person,
        total_revenue,
        total_cost,
        net_profit,
        profit_margin_percent,
        net_profit_per_person,
        converted,
    }
}

/// Seat and revenue figures for a trip sold at a fixed per-person price.
///
/// Revenue is projected two ways: from booked seats (`expected_revenue`,
/// `actual_profit`) and at full capacity (`total_revenue`, `net_profit`). The
/// margin is taken against full-capacity revenue.
pub fn trip_financials(trip: &Trip) -> TripFinancials {
    let capacity = Decimal::from(trip.total_capacity);
    let booked = Decimal::from(trip.booked_seats);

    let selling_price_per_person_home = trip
        .selling_price_per_person
        .saturating_mul(trip.exchange_rate);
    let expected_revenue = selling_price_per_person_home.saturating_mul(booked);
    let total_revenue = selling_price_per_person_home.saturating_mul(capacity);
    let net_profit = total_revenue.saturating_sub(trip.total_cost);

    TripFinancials {
        available_seats: trip.total_capacity.saturating_sub(trip.booked_seats),
        occupancy_rate_percent: percent_of(booked, capacity),
        selling_price_per_person_home,
        expected_revenue,
        total_revenue,
        net_profit,
        actual_profit: expected_revenue.saturating_sub(trip.total_cost),
        profit_margin_percent: percent_of(net_profit, total_revenue),
    }
}

/// Split a shared total into per-person shares of whole minor units.
///
/// Every share starts at the banker's-rounded even split. The minor units
/// lost or gained by that rounding are then moved one at a time onto the
/// leading shares, so the shares always add back up to `total` (to the
/// minor unit). No persons means no shares.
pub fn allocate_shared_costs(total: Decimal, person_count: u32) -> Allocation {
    if person_count == 0 {
        return Allocation::default();
    }

    let count = Decimal::from(person_count);
    let share = round_money(total / count, 2);
    let drift = total.saturating_sub(share.saturating_mul(count));

    let units = round_money(drift / MINOR_UNIT, 0).to_i64().unwrap_or(0);
    let step = if units < 0 { -MINOR_UNIT } else { MINOR_UNIT };
    let adjusted = usize::try_from(units.unsigned_abs()).unwrap_or(usize::MAX);

    let shares = (0..person_count as usize)
        .map(|i| if i < adjusted { share.saturating_add(step) } else { share })
        .collect();

    Allocation { share, shares }
}

/// Per-person split of a shared cost
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// The even split before any minor-unit adjustment
    pub share: Decimal,
    pub shares: Vec<Decimal>,
}
