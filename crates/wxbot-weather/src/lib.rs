//! Weather lookup for wxbot
//!
//! Resolves a location from chat input (explicit query, another user's saved
//! location via `@nick`, or the caller's own saved row), geocodes it, fetches
//! current conditions plus forecast, and renders one reply line. Successful
//! explicit lookups update the shared location table unless the caller opts
//! out with a trailing `dontsave`.

pub mod command;
pub mod geocode;
pub mod provider;
pub mod report;
pub mod resolve;
pub mod store;
pub mod types;
pub mod units;

pub use command::WeatherCommand;
pub use geocode::{Geocoder, GeocodingClient};
pub use provider::WeatherClient;
pub use resolve::{parse_input, ParsedInput};
pub use store::LocationStore;
pub use types::*;
