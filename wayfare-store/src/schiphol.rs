//! Schiphol Public Flights API adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};
use wayfare_core::{CoreError, CoreResult, Flight, FlightDirection, FlightSource, Route, ScheduleTime};
use wayfare_shared::Masked;

use crate::app_config::ProviderConfig;

const FLIGHTS_PATH: &str = "/public-flights/flights";

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    flights: Vec<ProviderFlight>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderFlight {
    id: String,
    flight_name: String,
    #[serde(default)]
    route: ProviderRoute,
    schedule_date_time: ScheduleTime,
    flight_direction: FlightDirection,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderRoute {
    #[serde(default)]
    destinations: Vec<String>,
}

impl From<ProviderFlight> for Flight {
    fn from(raw: ProviderFlight) -> Self {
        Flight::new(
            raw.id,
            raw.flight_name,
            Route::new(raw.route.destinations),
            raw.schedule_date_time,
            raw.flight_direction,
        )
    }
}

pub struct SchipholClient {
    http: HttpClient,
    flights_url: String,
    app_id: String,
    app_key: Masked<String>,
    resource_version: String,
}

impl SchipholClient {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            flights_url: format!("{}{}", config.base_url.trim_end_matches('/'), FLIGHTS_PATH),
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
            resource_version: config.resource_version.clone(),
        })
    }
}

fn remote_error(err: reqwest::Error) -> CoreError {
    warn!(error = %err, "Flight provider request failed");
    CoreError::RemoteFetch(err.to_string())
}

#[async_trait]
impl FlightSource for SchipholClient {
    async fn fetch_flights(
        &self,
        date: NaiveDate,
        direction: FlightDirection,
    ) -> CoreResult<Vec<Flight>> {
        let schedule_date = date.format("%Y-%m-%d").to_string();

        let response = self
            .http
            .get(&self.flights_url)
            .header("app_id", &self.app_id)
            .header("app_key", self.app_key.expose())
            .header(ACCEPT, "application/json")
            .header("ResourceVersion", &self.resource_version)
            .query(&[("scheduleDate", schedule_date.as_str()), ("flightDirection", direction.code())])
            .send()
            .await
            .map_err(remote_error)?
            .error_for_status()
            .map_err(remote_error)?;

        let body: FlightsResponse = response.json().await.map_err(remote_error)?;
        debug!(date = %schedule_date, %direction, count = body.flights.len(), "Provider returned flights");

        Ok(body.flights.into_iter().map(Flight::from).collect())
    }
}
