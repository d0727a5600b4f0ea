use async_trait::async_trait;
use chrono::NaiveDate;

use crate::flight::{Flight, FlightDirection};
use crate::CoreResult;

/// External schedule provider.
#[async_trait]
pub trait FlightSource: Send + Sync {
    /// One request to the provider for the given day and direction.
    /// Results are not filtered by route. Failures surface as
    /// `CoreError::RemoteFetch` and are not retried.
    async fn fetch_flights(
        &self,
        date: NaiveDate,
        direction: FlightDirection,
    ) -> CoreResult<Vec<Flight>>;
}
