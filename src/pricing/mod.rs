//! Pricing engine module for travel packages.
//!
//! Converts multi-currency package costs into the home currency, allocates
//! shared costs across participants and derives selling price and profit.
//! The calculators are pure; everything around them is a thin adapter.

pub mod calculators;
pub mod labels;
pub mod models;
pub mod reports;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    allocate_shared_costs, compute_pricing, convert_costs, percent_of, round_money,
    trip_financials, Allocation,
};
pub use labels::{Labeled, PackageStatus, PaymentStatus, RoomType};
pub use models::{
    ConvertedCosts, CostBreakdown, PricingResult, Trip, TripBooking, TripFinancials, UmrahPackage,
};
pub use routes::router;
pub use services::{PricingError, ZeroRatePolicy, MAX_AMOUNT};
