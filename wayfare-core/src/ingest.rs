use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::flight::{Flight, FlightDetails, FlightDirection};
use crate::repository::FlightStore;
use crate::supplier::FlightSource;
use crate::CoreResult;

/// Pulls a day of schedule data from the provider and caches it.
#[derive(Clone)]
pub struct FlightIngestion {
    source: Arc<dyn FlightSource>,
    store: Arc<dyn FlightStore>,
}

impl FlightIngestion {
    pub fn new(source: Arc<dyn FlightSource>, store: Arc<dyn FlightStore>) -> Self {
        Self { source, store }
    }

    /// Fetches flights and upserts them one at a time.
    ///
    /// The returned list is the provider's normalized data, not the stored
    /// documents. A failed upsert aborts the batch; records already written
    /// stay written.
    pub async fn ingest(&self, date: NaiveDate, direction: FlightDirection) -> CoreResult<Vec<Flight>> {
        let flights = self.source.fetch_flights(date, direction).await?;
        debug!(%date, %direction, count = flights.len(), "Fetched flights from provider");

        for flight in &flights {
            self.store.ingest_or_replace(flight).await?;
        }

        info!(%date, %direction, count = flights.len(), "Ingested flights");
        Ok(flights)
    }

    pub async fn patch_existing(&self, id: &str, details: &FlightDetails) -> CoreResult<()> {
        self.store.patch_existing(id, details).await?;
        info!(flight_id = id, "Flight updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::Route;
    use crate::CoreError;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::Mutex;

    struct FixedSource(CoreResult<Vec<Flight>>);

    #[async_trait]
    impl FlightSource for FixedSource {
        async fn fetch_flights(&self, _: NaiveDate, _: FlightDirection) -> CoreResult<Vec<Flight>> {
            match &self.0 {
                Ok(flights) => Ok(flights.clone()),
                Err(e) => Err(CoreError::RemoteFetch(e.to_string())),
            }
        }
    }

    /// Records upserts and fails on the configured flight id.
    #[derive(Default)]
    struct RecordingStore {
        written: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl FlightStore for RecordingStore {
        async fn ingest_or_replace(&self, flight: &Flight) -> CoreResult<()> {
            if self.fail_on.as_deref() == Some(flight.id.as_str()) {
                return Err(CoreError::StoreConnection("connection reset".into()));
            }
            self.written.lock().unwrap().push(flight.id.clone());
            Ok(())
        }

        async fn patch_existing(&self, id: &str, _: &FlightDetails) -> CoreResult<()> {
            Err(CoreError::NotFound(id.to_string()))
        }

        async fn get(&self, _: &str) -> CoreResult<Option<FlightDetails>> {
            Ok(None)
        }
    }

    fn flight(id: &str) -> Flight {
        Flight::new(
            id,
            format!("KL{}", id),
            Route::new(vec!["AMS".into(), "IST".into()]),
            DateTime::parse_from_rfc3339("2024-06-01T09:00:00+02:00").unwrap(),
            FlightDirection::Departure,
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_ingest_writes_every_flight_in_order() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(FixedSource(Ok(vec![flight("1"), flight("2"), flight("3")])));
        let ingestion = FlightIngestion::new(source, store.clone());

        let flights = ingestion.ingest(date(), FlightDirection::Departure).await.unwrap();

        assert_eq!(flights.len(), 3);
        assert_eq!(*store.written.lock().unwrap(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_failed_upsert_aborts_without_rollback() {
        let store = Arc::new(RecordingStore { fail_on: Some("2".into()), ..Default::default() });
        let source = Arc::new(FixedSource(Ok(vec![flight("1"), flight("2"), flight("3")])));
        let ingestion = FlightIngestion::new(source, store.clone());

        let result = ingestion.ingest(date(), FlightDirection::Departure).await;

        assert!(matches!(result, Err(CoreError::StoreConnection(_))));
        assert_eq!(*store.written.lock().unwrap(), vec!["1"]);
    }

    #[tokio::test]
    async fn test_provider_failure_writes_nothing() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(FixedSource(Err(CoreError::RemoteFetch("503".into()))));
        let ingestion = FlightIngestion::new(source, store.clone());

        let result = ingestion.ingest(date(), FlightDirection::Arrival).await;

        assert!(matches!(result, Err(CoreError::RemoteFetch(_))));
        assert!(store.written.lock().unwrap().is_empty());
    }
}
