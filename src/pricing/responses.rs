//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::Allocation;
use super::labels::{LabelEntry, Labeled, PackageStatus, PaymentStatus, RoomType};
use super::models::{ConvertedCosts, PricingResult, Trip, TripFinancials};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Home-currency conversions behind a pricing response
#[derive(Debug, Serialize)]
pub struct ConvertedCostsResponse {
    pub visa: MoneyResponse,
    pub fast_train: MoneyResponse,
    pub bus: MoneyResponse,
    pub supervisor_expenses: MoneyResponse,
    pub direct_per_person: MoneyResponse,
    pub shared_total: MoneyResponse,
}

impl ConvertedCostsResponse {
    fn from_converted(converted: &ConvertedCosts, currency: &str) -> Self {
        Self {
            visa: MoneyResponse::new(converted.visa_home, currency),
            fast_train: MoneyResponse::new(converted.fast_train_home, currency),
            bus: MoneyResponse::new(converted.bus_home, currency),
            supervisor_expenses: MoneyResponse::new(converted.supervisor_expenses_home, currency),
            direct_per_person: MoneyResponse::new(converted.direct_per_person, currency),
            shared_total: MoneyResponse::new(converted.shared_total, currency),
        }
    }
}

/// Response for a package pricing calculation
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub per_person_cost: MoneyResponse,
    pub selling_price_per_person: MoneyResponse,
    pub total_revenue: MoneyResponse,
    pub total_cost: MoneyResponse,
    pub net_profit: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit_margin_percent: Decimal,
    pub net_profit_per_person: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub exchange_rate: Decimal,
    pub number_of_persons: u32,
    pub converted: ConvertedCostsResponse,
}

impl PricingResponse {
    pub fn from_result(
        result: &PricingResult,
        exchange_rate: Decimal,
        number_of_persons: u32,
        currency: &str,
    ) -> Self {
        Self {
            per_person_cost: MoneyResponse::new(result.per_person_cost, currency),
            selling_price_per_person: MoneyResponse::new(result.selling_price_per_person, currency),
            total_revenue: MoneyResponse::new(result.total_revenue, currency),
            total_cost: MoneyResponse::new(result.total_cost, currency),
            net_profit: MoneyResponse::new(result.net_profit, currency),
            profit_margin_percent: result.profit_margin_percent,
            net_profit_per_person: MoneyResponse::new(result.net_profit_per_person, currency),
            exchange_rate,
            number_of_persons,
            converted: ConvertedCostsResponse::from_converted(&result.converted, currency),
        }
    }
}

/// Response for shared cost allocation
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub per_person: MoneyResponse,
    pub amounts: Vec<MoneyResponse>,
}

impl AllocationResponse {
    pub fn new(allocation: &Allocation, currency: &str) -> Self {
        Self {
            per_person: MoneyResponse::new(allocation.share, currency),
            amounts: allocation
                .shares
                .iter()
                .map(|share| MoneyResponse::new(*share, currency))
                .collect(),
        }
    }
}

/// Response for trip seat and revenue figures
#[derive(Debug, Serialize)]
pub struct TripFinancialsResponse {
    pub trip_number: String,
    pub total_capacity: u32,
    pub booked_seats: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub exchange_rate: Decimal,
    pub currency: String,
    #[serde(flatten)]
    pub financials: TripFinancials,
}

impl TripFinancialsResponse {
    pub fn new(trip: Trip, financials: TripFinancials, currency: &str) -> Self {
        Self {
            trip_number: trip.trip_number,
            total_capacity: trip.total_capacity,
            booked_seats: trip.booked_seats,
            exchange_rate: trip.exchange_rate,
            currency: currency.to_string(),
            financials,
        }
    }
}

/// Response for a single currency conversion
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub foreign: MoneyResponse,
    pub home: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub exchange_rate: Decimal,
}

/// Response carrying a generated package number
#[derive(Debug, Serialize)]
pub struct PackageNumberResponse {
    pub package_number: String,
}

/// Label tables for client-side pickers
#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub room_types: Vec<LabelEntry>,
    pub package_statuses: Vec<LabelEntry>,
    pub payment_statuses: Vec<LabelEntry>,
}

impl LabelsResponse {
    pub fn all() -> Self {
        Self {
            room_types: RoomType::entries(),
            package_statuses: PackageStatus::entries(),
            payment_statuses: PaymentStatus::entries(),
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
