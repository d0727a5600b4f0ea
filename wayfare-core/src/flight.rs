use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{CoreError, CoreResult};

/// Which side of the airport schedule a flight belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightDirection {
    #[serde(rename = "D")]
    Departure,
    #[serde(rename = "A")]
    Arrival,
}

impl FlightDirection {
    pub fn code(&self) -> &'static str {
        match self {
            FlightDirection::Departure => "D",
            FlightDirection::Arrival => "A",
        }
    }
}

impl fmt::Display for FlightDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FlightDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(FlightDirection::Departure),
            "A" => Ok(FlightDirection::Arrival),
            other => Err(CoreError::Validation(format!("unknown flight direction: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub destinations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_codes: Option<Vec<String>>,
}

impl Route {
    pub fn new(destinations: Vec<String>) -> Self {
        Self { destinations, airport_codes: None }
    }

    pub fn origin(&self) -> Option<&str> {
        self.destinations.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.destinations.get(1).map(String::as_str)
    }

    /// Route entries beyond the origin/destination pair.
    pub fn stop_count(&self) -> usize {
        self.destinations.len().saturating_sub(2)
    }

    pub fn serves(&self, origin: &str, destination: &str) -> bool {
        match (self.origin(), self.destination()) {
            (Some(o), Some(d)) => o.eq_ignore_ascii_case(origin) && d.eq_ignore_ascii_case(destination),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct AircraftType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iatamain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iatasub: Option<String>,
}

/// Scheduled time of a flight. Serializes back to the text it was read
/// from, so a cached document carries the provider's exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTime {
    raw: String,
    at: DateTime<FixedOffset>,
}

impl ScheduleTime {
    pub fn at(&self) -> DateTime<FixedOffset> {
        self.at
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<FixedOffset>> for ScheduleTime {
    fn from(at: DateTime<FixedOffset>) -> Self {
        Self {
            raw: at.to_rfc3339_opts(SecondsFormat::Millis, false),
            at,
        }
    }
}

impl FromStr for ScheduleTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let at = DateTime::parse_from_rfc3339(s)
            .map_err(|e| CoreError::Validation(format!("invalid schedule time {}: {}", s, e)))?;
        Ok(Self { raw: s.to_string(), at })
    }
}

impl Serialize for ScheduleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for ScheduleTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A normalized schedule entry as cached in the flight store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub flight_number: String,
    pub route: Route,
    pub schedule_date_time: ScheduleTime,
    pub flight_direction: FlightDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flight_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_estimated_off_block_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_landing_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<AircraftType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations: Option<u64>,
}

impl Flight {
    pub fn new(
        id: impl Into<String>,
        flight_number: impl Into<String>,
        route: Route,
        schedule_date_time: impl Into<ScheduleTime>,
        flight_direction: FlightDirection,
    ) -> Self {
        Self {
            id: id.into(),
            flight_number: flight_number.into(),
            route,
            schedule_date_time: schedule_date_time.into(),
            flight_direction,
            public_flight_state: None,
            public_estimated_off_block_time: None,
            estimated_landing_time: None,
            terminal: None,
            gate: None,
            aircraft_type: None,
            airline_code: None,
            reservations: None,
        }
    }

    /// Two-letter carrier prefix of the flight number, lowercased.
    pub fn airline_prefix(&self) -> String {
        self.flight_number.chars().take(2).collect::<String>().to_lowercase()
    }
}

/// Untyped flight document.
///
/// Used for point-updates (top-level fields replace stored ones) and for the
/// snapshot embedded in a reservation, which must survive verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightDetails(Map<String, Value>);

impl FlightDetails {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_flight(flight: &Flight) -> CoreResult<Self> {
        match serde_json::to_value(flight) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(_) => Err(CoreError::Validation("flight did not serialize to an object".into())),
            Err(e) => Err(CoreError::Validation(e.to_string())),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn schedule_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.0
            .get("scheduleDateTime")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }

    pub fn reservation_count(&self) -> u64 {
        self.0.get("reservations").and_then(Value::as_u64).unwrap_or(0)
    }

    /// Overwrites top-level fields with those in `patch`. Nested objects are
    /// replaced whole, not merged.
    pub fn overwrite_with(&mut self, patch: &FlightDetails) {
        for (field, value) in &patch.0 {
            self.0.insert(field.clone(), value.clone());
        }
    }
}

impl TryFrom<Value> for FlightDetails {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(CoreError::Validation("flight details must be an object".into())),
        }
    }
}
