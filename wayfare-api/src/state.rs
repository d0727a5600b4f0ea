use std::sync::Arc;

use wayfare_core::booking::BookingFlow;
use wayfare_core::ingest::FlightIngestion;
use wayfare_core::{FlightSource, FlightStore, ReservationStore};
use wayfare_store::app_config::RateLimitConfig;
use wayfare_store::RedisClient;

#[derive(Clone)]
pub struct AppState {
    pub ingestion: FlightIngestion,
    pub bookings: BookingFlow,
    pub reservations: Arc<dyn ReservationStore>,
    /// Rate limiting is only enabled when Redis is configured.
    pub redis: Option<Arc<RedisClient>>,
    pub rate_limit: RateLimitConfig,
}

impl AppState {
    pub fn new(
        source: Arc<dyn FlightSource>,
        flights: Arc<dyn FlightStore>,
        reservations: Arc<dyn ReservationStore>,
    ) -> Self {
        Self {
            ingestion: FlightIngestion::new(source, flights.clone()),
            bookings: BookingFlow::new(flights, reservations.clone()),
            reservations,
            redis: None,
            rate_limit: RateLimitConfig::default(),
        }
    }

    pub fn with_rate_limit(mut self, redis: Arc<RedisClient>, config: RateLimitConfig) -> Self {
        self.redis = Some(redis);
        self.rate_limit = config;
        self
    }
}
