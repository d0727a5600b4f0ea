use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use wayfare_core::{NewReservation, Reservation};

use crate::error::AppError;
use crate::state::AppState;
use crate::SuccessResponse;

const LIST_FAILED: &str = "Failed to fetch reservations";
const CREATE_FAILED: &str = "Failed to create reservation";
const DELETE_FAILED: &str = "Failed to delete reservation";
const RESERVATION_NOT_FOUND: &str = "Reservation not found";

#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub success: bool,
    pub reservation_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/{id}", delete(delete_reservation))
}

/// GET /reservations
async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<ReservationsResponse>, AppError> {
    let reservations = state
        .reservations
        .list_all()
        .await
        .map_err(|e| AppError::internal(LIST_FAILED, e))?;

    Ok(Json(ReservationsResponse { reservations }))
}

/// POST /reservations
/// The flight snapshot is stored as sent; it is not checked against the
/// flight store and there is no capacity or duplicate check.
/// A malformed body is reported like any other create failure.
async fn create_reservation(
    State(state): State<AppState>,
    payload: Result<Json<NewReservation>, JsonRejection>,
) -> Result<Json<CreateReservationResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::internal(CREATE_FAILED, e))?;

    let reservation = state
        .reservations
        .create(req)
        .await
        .map_err(|e| AppError::internal(CREATE_FAILED, e))?;

    info!(reservation_id = %reservation.id, flight_id = %reservation.flight_id, "Reservation created");

    Ok(Json(CreateReservationResponse {
        success: true,
        reservation_id: reservation.id,
    }))
}

/// DELETE /reservations/{id}
/// A malformed id cannot match any reservation and is reported as not found.
async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFoundError(RESERVATION_NOT_FOUND.to_string()))?;

    state
        .reservations
        .delete(id)
        .await
        .map_err(|e| AppError::from_core(e, DELETE_FAILED, RESERVATION_NOT_FOUND))?;

    info!(reservation_id = %id, "Reservation cancelled");
    Ok(Json(SuccessResponse::ok()))
}
