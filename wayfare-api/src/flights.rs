use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use wayfare_core::search::{parse_list, FacetFilters, FlightView, SearchCriteria, SortOrder};
use wayfare_core::{Flight, FlightDetails, FlightDirection};

use crate::error::AppError;
use crate::state::AppState;
use crate::SuccessResponse;

const FETCH_FAILED: &str = "Failed to fetch flight data";
const UPDATE_FAILED: &str = "Failed to update flight";
const FLIGHT_NOT_FOUND: &str = "Flight not found";
const INVALID_SEARCH: &str = "Invalid search parameters";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FlightsQuery {
    pub date: NaiveDate,
    pub direction: FlightDirection,
}

#[derive(Debug, Serialize)]
pub struct FlightsResponse {
    pub flights: Vec<Flight>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightRequest {
    pub id: String,
    pub flight_details: FlightDetails,
}

/// List-valued filters are comma-separated, e.g. `arrival=morning,afternoon`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub date: NaiveDate,
    #[serde(default = "default_direction")]
    pub direction: FlightDirection,
    pub from: String,
    pub to: String,
    pub return_date: Option<NaiveDate>,
    pub arrival: Option<String>,
    pub stops: Option<String>,
    pub airlines: Option<String>,
    pub sort: Option<String>,
}

fn default_direction() -> FlightDirection {
    FlightDirection::Departure
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outbound: Vec<FlightView>,
    pub inbound: Vec<FlightView>,
}

impl SearchQuery {
    fn criteria(&self) -> Result<SearchCriteria, AppError> {
        let from = self.from.trim();
        let to = self.to.trim();
        if from.is_empty() || to.is_empty() {
            return Err(AppError::invalid(INVALID_SEARCH, "from and to are required"));
        }

        let invalid = |e: wayfare_core::CoreError| AppError::invalid(INVALID_SEARCH, e);
        let facets = FacetFilters {
            arrival: parse_list(self.arrival.as_deref()).map_err(invalid)?,
            stops: parse_list(self.stops.as_deref()).map_err(invalid)?,
            airlines: self
                .airlines
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };
        let sort = match self.sort.as_deref() {
            Some(raw) => raw.parse::<SortOrder>().map_err(invalid)?,
            None => SortOrder::default(),
        };

        let mut criteria = SearchCriteria::new(from, to);
        criteria.facets = facets;
        criteria.sort = sort;
        Ok(criteria)
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights).put(update_flight))
        .route("/flights/search", get(search_flights))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /flights?date=YYYY-MM-DD&direction={D|A}
/// Fetches the day's schedule from the provider and caches it.
/// A bad query string takes the same 500 path as a provider failure.
async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<FlightsQuery>, QueryRejection>,
) -> Result<Json<FlightsResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::internal(FETCH_FAILED, e))?;

    let flights = state
        .ingestion
        .ingest(query.date, query.direction)
        .await
        .map_err(|e| AppError::internal(FETCH_FAILED, e))?;

    Ok(Json(FlightsResponse { flights }))
}

/// PUT /flights
/// Overwrites fields of a flight that is already cached. Never creates one.
async fn update_flight(
    State(state): State<AppState>,
    payload: Result<Json<UpdateFlightRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::internal(UPDATE_FAILED, e))?;

    state
        .ingestion
        .patch_existing(&req.id, &req.flight_details)
        .await
        .map_err(|e| AppError::from_core(e, UPDATE_FAILED, FLIGHT_NOT_FOUND))?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /flights/search?date&direction&from&to[&returnDate][&arrival][&stops][&airlines][&sort]
/// Ingests the requested day(s) and narrows the result to the route.
/// The return leg is looked up among arrivals on `returnDate`.
async fn search_flights(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, AppError>,
) -> Result<Json<SearchResponse>, AppError> {
    let criteria = query.criteria()?;

    let outbound = state
        .ingestion
        .ingest(query.date, query.direction)
        .await
        .map_err(|e| AppError::internal(FETCH_FAILED, e))?;
    let outbound = criteria.apply(outbound);

    let inbound = match query.return_date {
        Some(return_date) => {
            let flights = state
                .ingestion
                .ingest(return_date, FlightDirection::Arrival)
                .await
                .map_err(|e| AppError::internal(FETCH_FAILED, e))?;
            criteria.reversed().apply(flights)
        }
        None => Vec::new(),
    };

    info!(
        from = %criteria.origin,
        to = %criteria.destination,
        outbound = outbound.len(),
        inbound = inbound.len(),
        "Flight search completed"
    );

    Ok(Json(SearchResponse {
        outbound: outbound.into_iter().map(FlightView::from).collect(),
        inbound: inbound.into_iter().map(FlightView::from).collect(),
    }))
}
