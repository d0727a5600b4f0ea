pub mod lookup;
pub mod pii;

pub use lookup::{destination_name, flight_status_text, AIRLINE_LOGO_PATH, DISPLAY_PRICE_USD};
pub use pii::Masked;
