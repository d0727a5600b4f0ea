//! Static lookup tables used when rendering flights and reservations.
//!
//! The tables are built once on first use and never mutated, so they can be
//! read from any request handler without locking.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Every flight is shown with the same price; there is no fare engine.
pub const DISPLAY_PRICE_USD: u32 = 200;

pub const AIRLINE_LOGO_PATH: &str = "/general-airline-logo.png";

const DESTINATIONS: &[(&str, &str)] = &[
    ("AMS", "Amsterdam"),
    ("ATH", "Athens"),
    ("BCN", "Barcelona"),
    ("BEG", "Belgrade"),
    ("BER", "Berlin"),
    ("BRU", "Brussels"),
    ("BUD", "Budapest"),
    ("CPH", "Copenhagen"),
    ("DUB", "Dublin"),
    ("DUS", "Dusseldorf"),
    ("EDI", "Edinburgh"),
    ("FCO", "Rome Fiumicino"),
    ("FRA", "Frankfurt"),
    ("GVA", "Geneva"),
    ("HAM", "Hamburg"),
    ("HEL", "Helsinki"),
    ("KRK", "Krakow"),
    ("LEJ", "Leipzig"),
    ("LIS", "Lisbon"),
    ("LJU", "Ljubljana"),
    ("LON", "London"),
    ("MAD", "Madrid"),
    ("MIL", "Milan"),
    ("MUC", "Munich"),
    ("MXP", "Milan"),
    ("NAP", "Naples"),
    ("OSL", "Oslo"),
    ("OTP", "Bucharest"),
    ("PAR", "Paris"),
    ("PRG", "Prague"),
    ("RIX", "Riga"),
    ("ROM", "Rome"),
    ("SOF", "Sofia"),
    ("STO", "Stockholm"),
    ("STR", "Stuttgart"),
    ("TLL", "Tallinn"),
    ("VCE", "Venice"),
    ("VIE", "Vienna"),
    ("VNO", "Vilnius"),
    ("WAW", "Warsaw"),
    ("ZAG", "Zagreb"),
    ("ZRH", "Zurich"),
    ("ADA", "Adana"),
    ("ADB", "Izmir"),
    ("ASR", "Kayseri"),
    ("AYT", "Antalya"),
    ("BJV", "Bodrum"),
    ("DIY", "Diyarbakir"),
    ("DLM", "Dalaman"),
    ("DNZ", "Denizli"),
    ("ERZ", "Erzurum"),
    ("ESB", "Ankara"),
    ("GZP", "Alanya"),
    ("GZT", "Gaziantep"),
    ("IST", "Istanbul"),
    ("KYA", "Konya"),
    ("TZX", "Trabzon"),
    ("VAN", "Van"),
    ("ANC", "Anchorage"),
    ("ATL", "Atlanta"),
    ("BOS", "Boston"),
    ("DEN", "Denver"),
    ("DFW", "Dallas"),
    ("HNL", "Honolulu"),
    ("IAD", "Washington D.C."),
    ("LAS", "Las Vegas"),
    ("LAX", "Los Angeles"),
    ("MIA", "Miami"),
    ("NYC", "New York"),
    ("ORD", "Chicago"),
    ("PHX", "Phoenix"),
    ("SEA", "Seattle"),
    ("SFO", "San Francisco"),
    ("KZN", "Kazan"),
    ("LED", "St. Petersburg"),
    ("MOW", "Moscow"),
    ("BNE", "Brisbane"),
    ("MEL", "Melbourne"),
    ("SYD", "Sydney"),
    ("ADD", "Addis Ababa"),
    ("ALG", "Algiers"),
    ("AUH", "Abu Dhabi"),
    ("CAI", "Cairo"),
    ("CMN", "Casablanca"),
    ("CPT", "Cape Town"),
    ("DAR", "Dar es Salaam"),
    ("DOH", "Doha"),
    ("DXB", "Dubai"),
    ("JNB", "Johannesburg"),
    ("LOS", "Lagos"),
    ("NBO", "Nairobi"),
    ("RUH", "Riyadh"),
    ("TUN", "Tunis"),
    ("CAN", "Guangzhou"),
    ("CTU", "Chengdu"),
    ("PEK", "Beijing"),
    ("SHA", "Shanghai"),
    ("SZX", "Shenzhen"),
    ("FUK", "Fukuoka"),
    ("NGO", "Nagoya"),
    ("OSA", "Osaka"),
    ("SPK", "Sapporo"),
    ("TYO", "Tokyo"),
];

const FLIGHT_STATUSES: &[(&str, &str)] = &[
    ("SCH", "Scheduled"),
    ("AIR", "Airborne"),
    ("EXP", "Expected landing"),
    ("LND", "Landed"),
    ("ARR", "Arrived"),
    ("DEL", "Delayed"),
    ("WIL", "Wait in Lounge"),
    ("BRD", "Boarding"),
    ("DEP", "Departed"),
    ("CNX", "Cancelled"),
];

fn destinations() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| DESTINATIONS.iter().copied().collect())
}

fn statuses() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| FLIGHT_STATUSES.iter().copied().collect())
}

/// City name for an IATA airport/city code, case-insensitive.
/// Unknown codes are returned as given.
pub fn destination_name(code: &str) -> &str {
    destinations()
        .get(code.to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(code)
}

/// Human readable text for a public flight state code. Lookup is exact.
pub fn flight_status_text(status: &str) -> &str {
    statuses().get(status).copied().unwrap_or(status)
}
