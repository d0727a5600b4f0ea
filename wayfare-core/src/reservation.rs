use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flight::FlightDetails;

/// A booking as stored. `flight_details` is a copy taken at booking time and
/// is never rewritten, whatever later happens to the flight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub flight_id: String,
    pub user_id: String,
    pub flight_details: FlightDetails,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied part of a reservation; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub flight_id: String,
    pub user_id: String,
    pub flight_details: FlightDetails,
}

impl NewReservation {
    pub fn into_reservation(self, id: Uuid, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            flight_id: self.flight_id,
            user_id: self.user_id,
            flight_details: self.flight_details,
            created_at,
        }
    }
}
