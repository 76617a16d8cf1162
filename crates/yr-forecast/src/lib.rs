//! yr.no Forecast Client
//!
//! Fetches forecast XML documents from [yr.no](https://www.yr.no), converts
//! them to JSON and normalizes them into [`ForecastRecord`]s.

mod client;
mod error;
mod key;
pub mod transform;
mod types;
pub mod xml;

pub use client::YrClient;
pub use error::{ErrorKind, ForecastError, Result, TransportError};
pub use key::{tidy_url, ForecastKey};
pub use reqwest::StatusCode;
pub use types::{
    Credit, CreditLink, ForecastRecord, Location, Meta, OneOrMany, ParsedForecast, Position,
    Precipitation, Pressure, RawForecast, Sun, Symbol, Tabular, Temperature, TimeSlice, Timezone,
    WindDirection, WindSpeed,
};
