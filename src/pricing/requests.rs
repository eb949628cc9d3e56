//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::labels::{PackageStatus, RoomType};
use super::models::TripBooking;

/// Raw package cost fields, as entered by the user.
///
/// Counts are signed so that bad input reaches validation instead of failing
/// deserialization with an opaque message.
#[derive(Debug, Default, Deserialize)]
pub struct PricingRequest {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub exchange_rate: Option<Decimal>,
    pub number_of_persons: i32,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub visa_foreign: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub accommodation_total: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub barcode_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub flight_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub fast_train_foreign: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub other_expenses: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub commission: Decimal,

    #[serde(default)]
    pub bus_count: i32,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub bus_price_foreign: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub gifts_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub supervisor_expenses_foreign: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub supervisor_barcode_price: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub profit_margin: Decimal,
}

/// Request to allocate a shared cost
#[derive(Debug, Deserialize)]
pub struct AllocateSharedCostsRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub shared_total: Decimal,
    pub person_count: i32,
    #[serde(default)]
    pub currency: Option<String>,
}

/// One package in a report request. `costs` is validated exactly like a
/// `/compute` body.
#[derive(Debug, Deserialize)]
pub struct PackageRequest {
    pub id: Uuid,
    pub package_number: String,
    pub trip_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub costs: PricingRequest,
}

fn default_active() -> bool {
    true
}

/// Request for the profitability report
#[derive(Debug, Deserialize)]
pub struct ProfitabilityReportRequest {
    pub packages: Vec<PackageRequest>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Request for package statistics
#[derive(Debug, Deserialize)]
pub struct PackageStatisticsRequest {
    pub packages: Vec<PackageRequest>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Request for the booking collection summary
#[derive(Debug, Deserialize)]
pub struct CollectionSummaryRequest {
    pub bookings: Vec<TripBooking>,
}

/// Trip figures as entered on the trip form
#[derive(Debug, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub trip_number: Option<String>,
    pub total_capacity: i32,
    #[serde(default)]
    pub booked_seats: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub selling_price_per_person: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
}

/// Request to convert a single foreign-currency amount
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub exchange_rate: Option<Decimal>,
}

/// Query for the next package number
#[derive(Debug, Deserialize)]
pub struct PackageNumberQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub last: Option<String>,
}
