pub mod flight;
pub mod reservation;
pub mod repository;
pub mod supplier;
pub mod ingest;
pub mod booking;
pub mod search;

pub use flight::{Flight, FlightDetails, FlightDirection, Route, ScheduleTime};
pub use reservation::{NewReservation, Reservation};
pub use repository::{FlightStore, ReservationStore};
pub use supplier::FlightSource;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),
    #[error("Store unavailable: {0}")]
    StoreConnection(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
