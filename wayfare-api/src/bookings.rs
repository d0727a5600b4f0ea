use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_core::{CoreError, FlightDetails};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFlightRequest {
    pub user_id: String,
    pub flight: FlightDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub reservation_id: Uuid,
    pub counter_updated: bool,
}

const BOOKING_FAILED: &str = "Failed to create reservation";
const NOT_BOOKABLE: &str = "Flight cannot be booked";

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", post(book_flight))
}

/// POST /bookings
/// Creates the reservation, then bumps the flight's reservation counter.
/// A failed counter update is reported, not rolled back.
async fn book_flight(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<BookFlightRequest>, AppError>,
) -> Result<Json<BookingResponse>, AppError> {
    let outcome = state
        .bookings
        .book(&req.user_id, req.flight, Utc::now())
        .await
        .map_err(|e| match e {
            CoreError::Validation(_) => AppError::invalid(NOT_BOOKABLE, e),
            other => AppError::internal(BOOKING_FAILED, other),
        })?;

    Ok(Json(BookingResponse {
        success: true,
        reservation_id: outcome.reservation.id,
        counter_updated: outcome.counter_updated,
    }))
}
