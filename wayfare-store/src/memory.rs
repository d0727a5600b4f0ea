//! Process-local document stores with the same semantics as the Postgres ones.
//! Used when no database URL is configured, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfare_core::{
    CoreError, CoreResult, Flight, FlightDetails, FlightStore, NewReservation, Reservation,
    ReservationStore,
};

#[derive(Default)]
pub struct InMemoryFlightStore {
    flights: RwLock<HashMap<String, FlightDetails>>,
}

impl InMemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.flights.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.flights.read().await.is_empty()
    }
}

#[async_trait]
impl FlightStore for InMemoryFlightStore {
    async fn ingest_or_replace(&self, flight: &Flight) -> CoreResult<()> {
        let incoming = FlightDetails::from_flight(flight)?;
        let mut flights = self.flights.write().await;
        match flights.get_mut(&flight.id) {
            Some(stored) => stored.overwrite_with(&incoming),
            None => {
                flights.insert(flight.id.clone(), incoming);
            }
        }
        Ok(())
    }

    async fn patch_existing(&self, id: &str, details: &FlightDetails) -> CoreResult<()> {
        let mut flights = self.flights.write().await;
        let stored = flights
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(format!("flight {}", id)))?;
        stored.overwrite_with(details);
        Ok(())
    }

    async fn get(&self, id: &str) -> CoreResult<Option<FlightDetails>> {
        Ok(self.flights.read().await.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryReservationStore {
    reservations: RwLock<Vec<Reservation>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn create(&self, reservation: NewReservation) -> CoreResult<Reservation> {
        let reservation = reservation.into_reservation(Uuid::new_v4(), Utc::now());
        self.reservations.write().await.push(reservation.clone());
        Ok(reservation)
    }

    async fn list_all(&self) -> CoreResult<Vec<Reservation>> {
        Ok(self.reservations.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        let mut reservations = self.reservations.write().await;
        let position = reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("reservation {}", id)))?;
        reservations.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;
    use wayfare_core::{FlightDirection, Route};

    fn flight(id: &str, gate: Option<&str>) -> Flight {
        let mut flight = Flight::new(
            id,
            "KL1395",
            Route::new(vec!["AMS".into(), "IST".into()]),
            DateTime::parse_from_rfc3339("2024-06-01T09:00:00+02:00").unwrap(),
            FlightDirection::Departure,
        );
        flight.gate = gate.map(str::to_string);
        flight
    }

    fn details(value: serde_json::Value) -> FlightDetails {
        FlightDetails::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn test_reingest_keeps_one_record_and_latest_values_win() {
        let store = InMemoryFlightStore::new();
        store.ingest_or_replace(&flight("1", Some("D7"))).await.unwrap();
        store.ingest_or_replace(&flight("1", Some("E18"))).await.unwrap();

        assert_eq!(store.len().await, 1);
        let stored = store.get("1").await.unwrap().unwrap();
        assert_eq!(stored.get("gate"), Some(&json!("E18")));
    }

    #[tokio::test]
    async fn test_reingest_keeps_reservation_counter() {
        let store = InMemoryFlightStore::new();
        store.ingest_or_replace(&flight("1", None)).await.unwrap();
        store.patch_existing("1", &details(json!({ "reservations": 4 }))).await.unwrap();

        store.ingest_or_replace(&flight("1", None)).await.unwrap();

        assert_eq!(store.get("1").await.unwrap().unwrap().reservation_count(), 4);
    }

    #[tokio::test]
    async fn test_patch_unknown_flight_is_not_found_and_writes_nothing() {
        let store = InMemoryFlightStore::new();
        store.ingest_or_replace(&flight("1", None)).await.unwrap();

        let result = store.patch_existing("unknown-id", &details(json!({ "gate": "A1" }))).await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
        assert_eq!(store.len().await, 1);
        assert!(store.get("unknown-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_patch_overwrites_named_fields() {
        let store = InMemoryFlightStore::new();
        store.ingest_or_replace(&flight("1", Some("D7"))).await.unwrap();

        store
            .patch_existing("1", &details(json!({ "gate": "F4", "publicFlightState": "BRD" })))
            .await
            .unwrap();

        let stored = store.get("1").await.unwrap().unwrap();
        assert_eq!(stored.get("gate"), Some(&json!("F4")));
        assert_eq!(stored.get("publicFlightState"), Some(&json!("BRD")));
        assert_eq!(stored.get("flightNumber"), Some(&json!("KL1395")));
    }

    #[tokio::test]
    async fn test_reservations_list_in_insertion_order() {
        let store = InMemoryReservationStore::new();
        let mut ids = Vec::new();
        for user in ["u1", "u2", "u3"] {
            let created = store
                .create(NewReservation {
                    flight_id: "KL123".into(),
                    user_id: user.into(),
                    flight_details: FlightDetails::default(),
                })
                .await
                .unwrap();
            ids.push(created.id);
        }

        let listed: Vec<Uuid> = store.list_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let store = InMemoryReservationStore::new();
        let keep = store
            .create(NewReservation {
                flight_id: "KL1".into(),
                user_id: "u1".into(),
                flight_details: FlightDetails::default(),
            })
            .await
            .unwrap();
        let gone = store
            .create(NewReservation {
                flight_id: "KL2".into(),
                user_id: "u1".into(),
                flight_details: FlightDetails::default(),
            })
            .await
            .unwrap();

        store.delete(gone.id).await.unwrap();
        assert!(matches!(store.delete(gone.id).await, Err(CoreError::NotFound(_))));

        let remaining = store.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }
}
