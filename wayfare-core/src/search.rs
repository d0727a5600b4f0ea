use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use wayfare_shared::{destination_name, flight_status_text, AIRLINE_LOGO_PATH, DISPLAY_PRICE_USD};

use crate::flight::Flight;
use crate::{CoreError, CoreResult};

/// Time-of-day bucket on the scheduled time, in the schedule's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalWindow {
    Morning,
    Afternoon,
}

impl ArrivalWindow {
    pub fn contains(&self, hour: u32) -> bool {
        match self {
            ArrivalWindow::Morning => (5..12).contains(&hour),
            ArrivalWindow::Afternoon => (12..18).contains(&hour),
        }
    }
}

impl FromStr for ArrivalWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(ArrivalWindow::Morning),
            "afternoon" => Ok(ArrivalWindow::Afternoon),
            other => Err(CoreError::Validation(format!("unknown arrival window: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopFilter {
    Nonstop,
    OneStop,
    TwoOrMoreStops,
}

impl StopFilter {
    pub fn matches(&self, stops: usize) -> bool {
        match self {
            StopFilter::Nonstop => stops == 0,
            StopFilter::OneStop => stops == 1,
            StopFilter::TwoOrMoreStops => stops >= 2,
        }
    }
}

impl FromStr for StopFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonstop" => Ok(StopFilter::Nonstop),
            "oneStop" => Ok(StopFilter::OneStop),
            "twoOrMoreStops" => Ok(StopFilter::TwoOrMoreStops),
            other => Err(CoreError::Validation(format!("unknown stop filter: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Provider order.
    #[default]
    Recommended,
    /// Every flight has the same display price, so this keeps provider order.
    Lowest,
    Earliest,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(SortOrder::Recommended),
            "lowest" => Ok(SortOrder::Lowest),
            "earliest" => Ok(SortOrder::Earliest),
            other => Err(CoreError::Validation(format!("unknown sort order: {}", other))),
        }
    }
}

/// Optional predicates. Each non-empty facet must match (AND); values
/// within one facet are alternatives (OR).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    pub arrival: Vec<ArrivalWindow>,
    pub stops: Vec<StopFilter>,
    /// Two-letter carrier prefixes, any case.
    pub airlines: Vec<String>,
}

impl FacetFilters {
    pub fn matches(&self, flight: &Flight) -> bool {
        let hour = flight.schedule_date_time.at().hour();
        let arrival_ok = self.arrival.is_empty() || self.arrival.iter().any(|w| w.contains(hour));

        let stops = flight.route.stop_count();
        let stops_ok = self.stops.is_empty() || self.stops.iter().any(|s| s.matches(stops));

        let prefix = flight.airline_prefix();
        let airline_ok = self.airlines.is_empty()
            || self.airlines.iter().any(|code| code.to_lowercase() == prefix);

        arrival_ok && stops_ok && airline_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub facets: FacetFilters,
    pub sort: SortOrder,
}

impl SearchCriteria {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            facets: FacetFilters::default(),
            sort: SortOrder::default(),
        }
    }

    /// Same facets and sort, opposite direction of travel.
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            facets: self.facets.clone(),
            sort: self.sort,
        }
    }

    /// Route filter, then facets, then sort.
    pub fn apply(&self, flights: Vec<Flight>) -> Vec<Flight> {
        let mut matched: Vec<Flight> = filter_route(flights, &self.origin, &self.destination)
            .into_iter()
            .filter(|f| self.facets.matches(f))
            .collect();

        if self.sort == SortOrder::Earliest {
            matched.sort_by_key(|f| f.schedule_date_time.at());
        }
        matched
    }
}

/// A search result as shown on a result card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightView {
    #[serde(flatten)]
    pub flight: Flight,
    pub origin_name: String,
    pub destination_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    pub price_usd: u32,
    pub airline_logo: &'static str,
}

impl From<Flight> for FlightView {
    fn from(flight: Flight) -> Self {
        let origin_name = flight.route.origin().map(destination_name).unwrap_or_default().to_string();
        let arrival_name = flight.route.destination().map(destination_name).unwrap_or_default().to_string();
        let status_text = flight
            .public_flight_state
            .as_deref()
            .map(|state| flight_status_text(state).to_string());

        Self {
            flight,
            origin_name,
            destination_name: arrival_name,
            status_text,
            price_usd: DISPLAY_PRICE_USD,
            airline_logo: AIRLINE_LOGO_PATH,
        }
    }
}

/// Keeps flights whose first two route entries are exactly `[origin, destination]`.
pub fn filter_route(flights: Vec<Flight>, origin: &str, destination: &str) -> Vec<Flight> {
    flights
        .into_iter()
        .filter(|f| f.route.serves(origin, destination))
        .collect()
}

/// Parses a comma-separated query value; blanks are skipped.
pub fn parse_list<T>(raw: Option<&str>) -> CoreResult<Vec<T>>
where
    T: FromStr<Err = CoreError>,
{
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(T::from_str)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::{FlightDirection, Route};
    use chrono::DateTime;

    fn flight(id: &str, number: &str, route: &[&str], when: &str) -> Flight {
        Flight::new(
            id,
            number,
            Route::new(route.iter().map(|s| s.to_string()).collect()),
            DateTime::parse_from_rfc3339(when).unwrap(),
            FlightDirection::Departure,
        )
    }

    fn ids(flights: &[Flight]) -> Vec<&str> {
        flights.iter().map(|f| f.id.as_str()).collect()
    }

    fn sample() -> Vec<Flight> {
        vec![
            flight("1", "KL1395", &["AMS", "IST"], "2024-06-01T14:10:00+02:00"),
            flight("2", "TK1952", &["IST", "AMS"], "2024-06-01T07:00:00+02:00"),
            flight("3", "TK1958", &["AMS", "IST"], "2024-06-01T06:30:00+02:00"),
            flight("4", "PC1252", &["ams", "ist"], "2024-06-01T21:45:00+02:00"),
            flight("5", "KL1234", &["AMS", "FRA", "IST"], "2024-06-01T08:00:00+02:00"),
        ]
    }

    #[test]
    fn test_route_filter_keeps_exact_pair_only() {
        let matched = filter_route(sample(), "AMS", "IST");
        assert_eq!(ids(&matched), vec!["1", "3", "4"]);
        assert!(matched.iter().all(|f| f.route.serves("AMS", "IST")));

        let back = filter_route(sample(), "ist", "ams");
        assert_eq!(ids(&back), vec!["2"]);
    }

    #[test]
    fn test_arrival_windows_are_or_combined() {
        let mut criteria = SearchCriteria::new("AMS", "IST");
        criteria.facets.arrival = vec![ArrivalWindow::Morning];
        assert_eq!(ids(&criteria.apply(sample())), vec!["3"]);

        criteria.facets.arrival = vec![ArrivalWindow::Morning, ArrivalWindow::Afternoon];
        assert_eq!(ids(&criteria.apply(sample())), vec!["1", "3"]);
    }

    #[test]
    fn test_window_boundaries() {
        assert!(ArrivalWindow::Morning.contains(5));
        assert!(!ArrivalWindow::Morning.contains(12));
        assert!(ArrivalWindow::Afternoon.contains(12));
        assert!(!ArrivalWindow::Afternoon.contains(18));
        assert!(!ArrivalWindow::Morning.contains(4));
    }

    #[test]
    fn test_facets_are_and_combined() {
        let mut criteria = SearchCriteria::new("AMS", "IST");
        criteria.facets.arrival = vec![ArrivalWindow::Morning, ArrivalWindow::Afternoon];
        criteria.facets.airlines = vec!["KL".into()];
        assert_eq!(ids(&criteria.apply(sample())), vec!["1"]);

        criteria.facets.stops = vec![StopFilter::OneStop];
        assert!(criteria.apply(sample()).is_empty());
    }

    #[test]
    fn test_stop_filter_on_pair_routes() {
        let mut criteria = SearchCriteria::new("AMS", "IST");
        criteria.facets.stops = vec![StopFilter::Nonstop];
        assert_eq!(ids(&criteria.apply(sample())).len(), 3);
        criteria.facets.stops = vec![StopFilter::TwoOrMoreStops];
        assert!(criteria.apply(sample()).is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let mut criteria = SearchCriteria::new("AMS", "IST");
        assert_eq!(ids(&criteria.apply(sample())), vec!["1", "3", "4"]);

        criteria.sort = SortOrder::Lowest;
        assert_eq!(ids(&criteria.apply(sample())), vec!["1", "3", "4"]);

        criteria.sort = SortOrder::Earliest;
        assert_eq!(ids(&criteria.apply(sample())), vec!["3", "1", "4"]);
    }

    #[test]
    fn test_reversed_swaps_route() {
        let criteria = SearchCriteria::new("AMS", "IST").reversed();
        assert_eq!(ids(&criteria.apply(sample())), vec!["2"]);
    }

    #[test]
    fn test_flight_view_labels() {
        let mut f = flight("1", "KL1395", &["ams", "XYZ"], "2024-06-01T14:10:00+02:00");
        f.public_flight_state = Some("BRD".into());

        let view = FlightView::from(f);
        assert_eq!(view.origin_name, "Amsterdam");
        assert_eq!(view.destination_name, "XYZ");
        assert_eq!(view.status_text.as_deref(), Some("Boarding"));
        assert_eq!(view.price_usd, 200);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["flightNumber"], "KL1395");
        assert_eq!(json["originName"], "Amsterdam");
        assert_eq!(json["airlineLogo"], "/general-airline-logo.png");
    }

    #[test]
    fn test_parse_list() {
        let windows: Vec<ArrivalWindow> = parse_list(Some("morning, afternoon,")).unwrap();
        assert_eq!(windows, vec![ArrivalWindow::Morning, ArrivalWindow::Afternoon]);

        let stops: Vec<StopFilter> = parse_list(None).unwrap();
        assert!(stops.is_empty());

        assert!(parse_list::<StopFilter>(Some("nonstop,direct")).is_err());
        assert_eq!("earliest".parse::<SortOrder>().unwrap(), SortOrder::Earliest);
    }
}
