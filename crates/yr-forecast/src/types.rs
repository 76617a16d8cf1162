//! Forecast document types
//!
//! Attribute values stay the strings the yr.no document carries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A forecast document as read from yr.no, before normalization
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedForecast {
    pub location: Location,
    #[serde(default)]
    pub credit: Option<Credit>,
    #[serde(default)]
    pub links: Option<Value>,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub sun: Option<Sun>,
    pub forecast: RawForecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    /// Free-text summary, dropped during normalization
    #[serde(default)]
    pub text: Option<Value>,
    pub tabular: Tabular,
}

/// Wrapper element around the time-slices
#[derive(Debug, Clone, Deserialize)]
pub struct Tabular {
    pub time: OneOrMany<TimeSlice>,
}

/// A repeated element that collapses to a plain value when it occurs once
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Normalized forecast, the value stored in the cache and served to widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub location: Location,
    pub credit: Option<Credit>,
    pub links: Option<Value>,
    pub meta: Option<Meta>,
    pub sun: Option<Sun>,
    /// Time-slices in document order
    pub tabular: Vec<TimeSlice>,
}

impl ForecastRecord {
    /// The first `limit` time-slices
    pub fn upcoming(&self, limit: usize) -> &[TimeSlice] {
        &self.tabular[..limit.min(self.tabular.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<Timezone>,
    #[serde(rename = "location", default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timezone {
    pub id: String,
    #[serde(rename = "utcoffsetMinutes", default)]
    pub utc_offset_minutes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub altitude: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub geobase: Option<String>,
    pub geobaseid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub link: Option<CreditLink>,
}

/// Attribution yr.no requires next to its data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub lastupdate: Option<String>,
    pub nextupdate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub rise: Option<String>,
    pub set: Option<String>,
}

/// One forecast period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlice {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub period: Option<String>,
    pub symbol: Symbol,
    pub precipitation: Precipitation,
    #[serde(default)]
    pub wind_direction: Option<WindDirection>,
    pub wind_speed: WindSpeed,
    pub temperature: Temperature,
    #[serde(default)]
    pub pressure: Option<Pressure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub number: String,
    #[serde(rename = "numberEx", default)]
    pub number_ex: Option<String>,
    pub name: String,
    #[serde(default)]
    pub var: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub value: String,
    #[serde(default)]
    pub minvalue: Option<String>,
    #[serde(default)]
    pub maxvalue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindDirection {
    pub deg: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSpeed {
    pub mps: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub unit: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    pub unit: String,
    pub value: String,
}
