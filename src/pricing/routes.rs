//! HTTP handlers for the pricing API.
//!
//! Handlers only move data between JSON and the services; no pricing logic
//! lives here.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;

use crate::error::Result;
use crate::AppState;

use super::reports::{self, CollectionSummary, PackageStatistics, ProfitabilityLine};
use super::requests::{
    AllocateSharedCostsRequest, CollectionSummaryRequest, ConvertRequest, PackageNumberQuery,
    PackageStatisticsRequest, PricingRequest, ProfitabilityReportRequest, TripRequest,
};
use super::responses::{
    AllocationResponse, ConvertResponse, LabelsResponse, MoneyResponse, PackageNumberResponse,
    PricingResponse, TripFinancialsResponse,
};
use super::services;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/compute", post(compute))
        .route("/allocate", post(allocate))
        .route("/convert", post(convert))
        .route("/trips/financials", post(trip_financials))
        .route("/package-number", get(package_number))
        .route("/labels", get(labels))
        .route("/reports/profitability", post(profitability))
        .route("/reports/statistics", post(statistics))
        .route("/reports/collections", post(collections))
}

async fn compute(
    State(state): State<AppState>,
    Json(request): Json<PricingRequest>,
) -> Result<Json<PricingResponse>> {
    let settings = &state.config.pricing;
    let (breakdown, result) = services::price_package(&request, settings)?;

    Ok(Json(PricingResponse::from_result(
        &result,
        breakdown.exchange_rate,
        breakdown.number_of_persons,
        &settings.home_currency,
    )))
}

async fn allocate(
    State(state): State<AppState>,
    Json(request): Json<AllocateSharedCostsRequest>,
) -> Result<Json<AllocationResponse>> {
    let settings = &state.config.pricing;
    let allocation = services::allocate_request(&request, settings)?;
    let currency = request.currency.as_deref().unwrap_or(settings.home_currency.as_str());

    Ok(Json(AllocationResponse::new(&allocation, currency)))
}

async fn convert(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>> {
    let settings = &state.config.pricing;
    let rate = request.exchange_rate.unwrap_or(settings.default_exchange_rate);
    let (applied, home) = services::convert_to_home(request.amount, rate, settings)?;

    Ok(Json(ConvertResponse {
        foreign: MoneyResponse::new(request.amount, &settings.foreign_currency),
        home: MoneyResponse::new(home, &settings.home_currency),
        exchange_rate: applied,
    }))
}

async fn trip_financials(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripFinancialsResponse>> {
    let settings = &state.config.pricing;
    let (trip, figures) = services::price_trip(&request, settings)?;

    Ok(Json(TripFinancialsResponse::new(trip, figures, &settings.home_currency)))
}

async fn package_number(Query(query): Query<PackageNumberQuery>) -> Json<PackageNumberResponse> {
    let year = query.year.unwrap_or_else(|| chrono::Local::now().year());
    Json(PackageNumberResponse {
        package_number: services::next_package_number(year, query.last.as_deref()),
    })
}

async fn labels() -> Json<LabelsResponse> {
    Json(LabelsResponse::all())
}

async fn profitability(
    State(state): State<AppState>,
    Json(request): Json<ProfitabilityReportRequest>,
) -> Result<Json<Vec<ProfitabilityLine>>> {
    let packages = services::validate_packages(&request.packages, &state.config.pricing)?;

    Ok(Json(reports::profitability_report(
        &packages,
        request.start_date,
        request.end_date,
    )))
}

async fn statistics(
    State(state): State<AppState>,
    Json(request): Json<PackageStatisticsRequest>,
) -> Result<Json<PackageStatistics>> {
    let packages: Vec<_> = services::validate_packages(&request.packages, &state.config.pricing)?
        .into_iter()
        .filter(|p| p.is_within(request.start_date, request.end_date))
        .collect();

    Ok(Json(reports::package_statistics(&packages)))
}

async fn collections(
    State(state): State<AppState>,
    Json(request): Json<CollectionSummaryRequest>,
) -> Result<Json<CollectionSummary>> {
    services::validate_bookings(&request.bookings, &state.config.pricing)?;
    Ok(Json(reports::collection_summary(&request.bookings)))
}
