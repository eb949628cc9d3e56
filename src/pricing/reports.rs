//! Roll-ups across many packages or bookings.
//!
//! Every per-package figure comes from `compute_pricing`, so reports never
//! disagree with the single-package calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::calculators::{compute_pricing, percent_of};
use super::labels::{Labeled, PackageStatus, PaymentStatus, RoomType};
use super::models::{TripBooking, UmrahPackage};

/// One package row of the profitability report.
///
/// Per-person components are multiplied out by the number of persons; shared
/// components are already group totals.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitabilityLine {
    pub package_id: Uuid,
    pub package_number: String,
    pub trip_name: String,
    pub date: NaiveDate,
    pub number_of_persons: u32,
    pub room_type: RoomType,
    pub status: PackageStatus,
    pub status_label: &'static str,

    pub total_revenue: Decimal,

    pub visa_cost: Decimal,
    pub accommodation_cost: Decimal,
    pub barcode_cost: Decimal,
    pub flight_cost: Decimal,
    pub fast_train_cost: Decimal,
    pub other_expenses_cost: Decimal,
    pub commission_cost: Decimal,
    pub bus_cost: Decimal,
    pub gifts_cost: Decimal,
    pub supervisor_expenses_cost: Decimal,
    pub supervisor_barcode_cost: Decimal,

    pub total_costs: Decimal,
    pub net_profit: Decimal,
    pub profit_margin_percent: Decimal,
}

impl ProfitabilityLine {
    pub fn from_package(package: &UmrahPackage) -> Self {
        let costs = &package.costs;
        let result = compute_pricing(costs);
        let persons = Decimal::from(costs.number_of_persons);
        let converted = &result.converted;

        Self {
            package_id: package.id,
            package_number: package.package_number.clone(),
            trip_name: package.trip_name.clone(),
            date: package.date,
            number_of_persons: costs.number_of_persons,
            room_type: package.room_type,
            status: package.status,
            status_label: package.status.label(),
            total_revenue: result.total_revenue,
            visa_cost: converted.visa_home.saturating_mul(persons),
            accommodation_cost: costs.accommodation_total.saturating_mul(persons),
            barcode_cost: costs.barcode_price.saturating_mul(persons),
            flight_cost: costs.flight_price.saturating_mul(persons),
            fast_train_cost: converted.fast_train_home.saturating_mul(persons),
            other_expenses_cost: costs.other_expenses.saturating_mul(persons),
            commission_cost: costs.commission.saturating_mul(persons),
            bus_cost: converted.bus_home,
            gifts_cost: costs.gifts_price,
            supervisor_expenses_cost: converted.supervisor_expenses_home,
            supervisor_barcode_cost: costs.supervisor_barcode_price,
            total_costs: result.total_cost,
            net_profit: result.net_profit,
            profit_margin_percent: result.profit_margin_percent,
        }
    }
}

/// Build the profitability report, most profitable package first.
///
/// The date filter is inclusive and only applies when both bounds are given.
pub fn profitability_report(
    packages: &[UmrahPackage],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<ProfitabilityLine> {
    let mut lines: Vec<ProfitabilityLine> = packages
        .iter()
        .filter(|p| p.is_within(start, end))
        .map(ProfitabilityLine::from_package)
        .collect();

    lines.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
    lines
}

/// Aggregate figures across packages
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageStatistics {
    pub total_packages: usize,
    pub active_packages: usize,
    pub completed_packages: usize,
    pub cancelled_packages: usize,
    pub total_pilgrims: u64,
    pub total_revenue: Decimal,
    pub total_costs: Decimal,
    pub total_profit: Decimal,
    /// Mean of the per-person markup amounts
    pub average_markup: Decimal,
    pub packages_by_room_type: BTreeMap<RoomType, usize>,
    pub packages_by_status: BTreeMap<PackageStatus, usize>,
}

pub fn package_statistics(packages: &[UmrahPackage]) -> PackageStatistics {
    let mut stats = PackageStatistics {
        total_packages: packages.len(),
        ..Default::default()
    };
    let mut markup_sum = Decimal::ZERO;

    for package in packages {
        let result = compute_pricing(&package.costs);

        if package.is_active {
            stats.active_packages += 1;
        }
        match package.status {
            PackageStatus::Completed => stats.completed_packages += 1,
            PackageStatus::Cancelled => stats.cancelled_packages += 1,
            _ => {}
        }

        stats.total_pilgrims += u64::from(package.costs.number_of_persons);
        stats.total_revenue = stats.total_revenue.saturating_add(result.total_revenue);
        stats.total_costs = stats.total_costs.saturating_add(result.total_cost);
        stats.total_profit = stats.total_profit.saturating_add(result.net_profit);
        markup_sum = markup_sum.saturating_add(package.costs.profit_margin);

        *stats.packages_by_room_type.entry(package.room_type).or_default() += 1;
        *stats.packages_by_status.entry(package.status).or_default() += 1;
    }

    if !packages.is_empty() {
        stats.average_markup = markup_sum / Decimal::from(packages.len());
    }

    stats
}

/// Collection position across trip bookings
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionSummary {
    pub booking_count: usize,
    pub total_revenue: Decimal,
    pub total_paid: Decimal,
    pub total_remaining: Decimal,
    /// Paid as a percentage of revenue; 0 when there is no revenue
    pub collection_rate_percent: Decimal,
    pub by_payment_status: BTreeMap<PaymentStatus, usize>,
}

pub fn collection_summary(bookings: &[TripBooking]) -> CollectionSummary {
    let mut summary = CollectionSummary {
        booking_count: bookings.len(),
        ..Default::default()
    };

    for booking in bookings {
        summary.total_revenue = summary.total_revenue.saturating_add(booking.total_amount());
        summary.total_paid = summary.total_paid.saturating_add(booking.paid_amount);
        summary.total_remaining = summary
            .total_remaining
            .saturating_add(booking.remaining_amount());
        *summary
            .by_payment_status
            .entry(booking.payment_status())
            .or_default() += 1;
    }

    summary.collection_rate_percent = percent_of(summary.total_paid, summary.total_revenue);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::CostBreakdown;
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn package(number: &str, day: NaiveDate, persons: u32, markup: Decimal) -> UmrahPackage {
        UmrahPackage {
            id: Uuid::new_v4(),
            package_number: number.to_string(),
            trip_name: format!("Trip {number}"),
            date: day,
            room_type: RoomType::Quad,
            status: PackageStatus::Confirmed,
            is_active: true,
            costs: CostBreakdown {
                exchange_rate: dec!(10),
                number_of_persons: persons,
                visa_foreign: dec!(100),
                flight_price: dec!(5000),
                bus_count: 1,
                bus_price_foreign: dec!(400),
                gifts_price: dec!(1000),
                profit_margin: markup,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_profitability_line_components() {
        let line = ProfitabilityLine::from_package(&package("UMR-2025-0001", date(1, 10), 4, dec!(500)));

        assert_eq!(line.visa_cost, dec!(4000)); // 100 * 10 * 4
        assert_eq!(line.flight_cost, dec!(20000));
        assert_eq!(line.bus_cost, dec!(4000)); // group total
        assert_eq!(line.gifts_cost, dec!(1000));
        // per person: 1000 + 5000 + (4000 + 1000) / 4 = 7250
        assert_eq!(line.total_costs, dec!(29000));
        assert_eq!(line.total_revenue, dec!(31000));
        assert_eq!(line.net_profit, dec!(2000));
        assert_eq!(line.status_label, "مؤكد");

        let component_sum = line.visa_cost
            + line.accommodation_cost
            + line.barcode_cost
            + line.flight_cost
            + line.fast_train_cost
            + line.other_expenses_cost
            + line.commission_cost
            + line.bus_cost
            + line.gifts_cost
            + line.supervisor_expenses_cost
            + line.supervisor_barcode_cost;
        assert_eq!(component_sum, line.total_costs);
    }

    #[test]
    fn test_profitability_report_sorted_and_filtered() {
        let packages = vec![
            package("UMR-2025-0001", date(1, 10), 4, dec!(100)),
            package("UMR-2025-0002", date(2, 10), 4, dec!(900)),
            package("UMR-2025-0003", date(3, 10), 4, dec!(500)),
        ];

        let all = profitability_report(&packages, None, None);
        let numbers: Vec<&str> = all.iter().map(|l| l.package_number.as_str()).collect();
        assert_eq!(numbers, vec!["UMR-2025-0002", "UMR-2025-0003", "UMR-2025-0001"]);

        let february = profitability_report(&packages, Some(date(2, 1)), Some(date(2, 28)));
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].package_number, "UMR-2025-0002");
    }

    #[test]
    fn test_package_statistics() {
        let mut cancelled = package("UMR-2025-0002", date(2, 10), 2, dec!(300));
        cancelled.status = PackageStatus::Cancelled;
        cancelled.is_active = false;
        cancelled.room_type = RoomType::Double;

        let packages = vec![package("UMR-2025-0001", date(1, 10), 4, dec!(500)), cancelled];
        let stats = package_statistics(&packages);

        assert_eq!(stats.total_packages, 2);
        assert_eq!(stats.active_packages, 1);
        assert_eq!(stats.cancelled_packages, 1);
        assert_eq!(stats.completed_packages, 0);
        assert_eq!(stats.total_pilgrims, 6);
        assert_eq!(stats.total_profit, dec!(2600)); // 500*4 + 300*2
        assert_eq!(stats.average_markup, dec!(400));
        assert_eq!(stats.packages_by_room_type.get(&RoomType::Quad), Some(&1));
        assert_eq!(stats.packages_by_status.get(&PackageStatus::Cancelled), Some(&1));
    }

    #[test]
    fn test_package_statistics_empty() {
        let stats = package_statistics(&[]);
        assert_eq!(stats.total_packages, 0);
        assert_eq!(stats.average_markup, dec!(0));
        assert!(stats.packages_by_status.is_empty());
    }

    #[test]
    fn test_collection_summary() {
        let bookings = vec![
            TripBooking {
                number_of_persons: 2,
                price_per_person: dec!(1000),
                paid_amount: dec!(2000),
            },
            TripBooking {
                number_of_persons: 3,
                price_per_person: dec!(1000),
                paid_amount: dec!(1000),
            },
            TripBooking {
                number_of_persons: 1,
                price_per_person: dec!(3000),
                paid_amount: dec!(0),
            },
        ];
        let summary = collection_summary(&bookings);

        assert_eq!(summary.booking_count, 3);
        assert_eq!(summary.total_revenue, dec!(8000));
        assert_eq!(summary.total_paid, dec!(3000));
        assert_eq!(summary.total_remaining, dec!(5000));
        assert_eq!(summary.collection_rate_percent, dec!(37.5));
        assert_eq!(summary.by_payment_status.get(&PaymentStatus::FullyPaid), Some(&1));
        assert_eq!(summary.by_payment_status.get(&PaymentStatus::PartiallyPaid), Some(&1));
        assert_eq!(summary.by_payment_status.get(&PaymentStatus::NotPaid), Some(&1));
    }

    #[test]
    fn test_collection_rate_on_tiny_revenue_saturates() {
        let bookings = vec![TripBooking {
            number_of_persons: 1,
            price_per_person: dec!(0.0000000000000000000000000001),
            paid_amount: dec!(1000000),
        }];
        let summary = collection_summary(&bookings);
        assert_eq!(summary.collection_rate_percent, Decimal::MAX);
    }

    #[test]
    fn test_collection_summary_no_revenue() {
        let summary = collection_summary(&[]);
        assert_eq!(summary.collection_rate_percent, dec!(0));
        assert_eq!(summary.booking_count, 0);
    }
}
