use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::flight::FlightDetails;
use crate::repository::{FlightStore, ReservationStore};
use crate::reservation::{NewReservation, Reservation};
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub reservation: Reservation,
    /// False when the reservation exists but the flight's counter could not
    /// be bumped. The reservation is not rolled back in that case.
    pub counter_updated: bool,
}

/// Books a flight: reservation first, then the flight's reservation counter.
#[derive(Clone)]
pub struct BookingFlow {
    flights: Arc<dyn FlightStore>,
    reservations: Arc<dyn ReservationStore>,
}

impl BookingFlow {
    pub fn new(flights: Arc<dyn FlightStore>, reservations: Arc<dyn ReservationStore>) -> Self {
        Self { flights, reservations }
    }

    pub async fn book(
        &self,
        user_id: &str,
        flight: FlightDetails,
        now: DateTime<Utc>,
    ) -> CoreResult<BookingOutcome> {
        let flight_id = flight
            .id()
            .ok_or_else(|| CoreError::Validation("flight id is required".into()))?
            .to_string();

        let departs = flight
            .schedule_date_time()
            .ok_or_else(|| CoreError::Validation("scheduleDateTime is missing or invalid".into()))?;
        if departs.with_timezone(&Utc) < now {
            return Err(CoreError::Validation(format!("flight {} has already departed", flight_id)));
        }

        let next_count = flight.reservation_count() + 1;
        let reservation = self
            .reservations
            .create(NewReservation {
                flight_id: flight_id.clone(),
                user_id: user_id.to_string(),
                flight_details: flight.clone(),
            })
            .await?;
        info!(reservation_id = %reservation.id, flight_id = %flight_id, "Reservation created");

        let mut update = flight;
        update.insert("reservations", Value::from(next_count));

        let counter_updated = match self.flights.patch_existing(&flight_id, &update).await {
            Ok(()) => true,
            Err(e) => {
                warn!(flight_id = %flight_id, error = %e, "Reservation kept but flight counter not updated");
                false
            }
        };

        Ok(BookingOutcome { reservation, counter_updated })
    }
}
