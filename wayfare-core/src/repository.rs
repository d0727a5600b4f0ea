use async_trait::async_trait;
use uuid::Uuid;

use crate::flight::{Flight, FlightDetails};
use crate::reservation::{NewReservation, Reservation};
use crate::CoreResult;

/// Document collection of flights keyed by flight identifier.
///
/// The two write paths are deliberately distinct: ingestion inserts or
/// replaces, a point-update only ever touches a record that already exists.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Insert the flight, or overwrite the stored fields it carries.
    async fn ingest_or_replace(&self, flight: &Flight) -> CoreResult<()>;

    /// Overwrite top-level fields of an existing flight.
    /// Fails with `CoreError::NotFound` and writes nothing when `id` is unknown.
    async fn patch_existing(&self, id: &str, details: &FlightDetails) -> CoreResult<()>;

    async fn get(&self, id: &str) -> CoreResult<Option<FlightDetails>>;
}

/// Document collection of reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn create(&self, reservation: NewReservation) -> CoreResult<Reservation>;

    /// Every reservation, in insertion order.
    async fn list_all(&self) -> CoreResult<Vec<Reservation>>;

    /// Fails with `CoreError::NotFound` when nothing matched.
    async fn delete(&self, id: Uuid) -> CoreResult<()>;
}
