//! Domain models for package pricing.
//!
//! `CostBreakdown` is the engine input, `PricingResult` its output. Neither is
//! persisted; both are rebuilt from caller-supplied values on every change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::labels::{PackageStatus, PaymentStatus, RoomType};

/// Cost inputs for one priced package or booking.
///
/// Foreign-currency fields (`*_foreign`) are denominated in the secondary
/// currency and converted with `exchange_rate`. Everything else is already in
/// the home currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    /// Secondary -> home currency rate. Used as given by the engine.
    pub exchange_rate: Decimal,
    pub number_of_persons: u32,

    // Per-person direct costs
    pub visa_foreign: Decimal,
    pub accommodation_total: Decimal,
    pub barcode_price: Decimal,
    pub flight_price: Decimal,
    pub fast_train_foreign: Decimal,
    pub other_expenses: Decimal,
    pub commission: Decimal,

    // Shared costs (group totals)
    pub bus_count: u32,
    pub bus_price_foreign: Decimal,
    pub gifts_price: Decimal,
    pub supervisor_expenses_foreign: Decimal,
    pub supervisor_barcode_price: Decimal,

    /// Flat per-person markup, not a percentage. May be negative.
    pub profit_margin: Decimal,
}

impl CostBreakdown {
    /// True if any component needs the exchange rate to be meaningful.
    pub fn has_foreign_costs(&self) -> bool {
        !self.visa_foreign.is_zero()
            || !self.fast_train_foreign.is_zero()
            || (self.bus_count > 0 && !self.bus_price_foreign.is_zero())
            || !self.supervisor_expenses_foreign.is_zero()
    }
}

/// Home-currency components derived from a `CostBreakdown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertedCosts {
    pub visa_home: Decimal,
    pub fast_train_home: Decimal,
    /// Total across all buses
    pub bus_home: Decimal,
    /// Total for the group
    pub supervisor_expenses_home: Decimal,
    pub direct_per_person: Decimal,
    pub shared_total: Decimal,
}

/// Cost, revenue and profit figures for one `CostBreakdown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub per_person_cost: Decimal,
    pub selling_price_per_person: Decimal,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
    pub profit_margin_percent: Decimal,
    pub net_profit_per_person: Decimal,
    pub converted: ConvertedCosts,
}

/// Umrah package with validated costs, ready for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct UmrahPackage {
    pub id: Uuid,
    pub package_number: String,
    pub trip_name: String,
    pub date: NaiveDate,
    pub room_type: RoomType,
    pub status: PackageStatus,
    pub is_active: bool,
    pub costs: CostBreakdown,
}

impl UmrahPackage {
    /// Check if the package date falls within an inclusive range.
    ///
    /// The filter only applies when both bounds are present.
    pub fn is_within(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        match (start, end) {
            (Some(s), Some(e)) => self.date >= s && self.date <= e,
            _ => true,
        }
    }
}

/// Trip booking with its payment position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripBooking {
    pub number_of_persons: u32,
    pub price_per_person: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
}

impl TripBooking {
    pub fn total_amount(&self) -> Decimal {
        self.price_per_person
            .saturating_mul(Decimal::from(self.number_of_persons))
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.total_amount().saturating_sub(self.paid_amount)
    }

    /// Payment status derived from paid vs. total.
    pub fn payment_status(&self) -> PaymentStatus {
        if self.paid_amount.is_zero() {
            PaymentStatus::NotPaid
        } else if self.paid_amount >= self.total_amount() {
            PaymentStatus::FullyPaid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }
}

/// Seat-priced trip: one per-person price, one overall cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub trip_number: String,
    pub total_capacity: u32,
    pub booked_seats: u32,
    /// In the trip's pricing currency
    pub selling_price_per_person: Decimal,
    /// Pricing currency -> home currency
    pub exchange_rate: Decimal,
    /// Home currency, all expenses of the trip
    pub total_cost: Decimal,
}

/// Seat, revenue and profit figures for a `Trip`, in the home currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripFinancials {
    pub available_seats: u32,
    pub occupancy_rate_percent: Decimal,
    pub selling_price_per_person_home: Decimal,
    /// Revenue from the seats booked so far
    pub expected_revenue: Decimal,
    /// Revenue if every seat sells
    pub total_revenue: Decimal,
    /// `total_revenue - total_cost`
    pub net_profit: Decimal,
    /// `expected_revenue - total_cost`
    pub actual_profit: Decimal,
    pub profit_margin_percent: Decimal,
}
