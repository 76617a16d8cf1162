//! Conversion of yr.no forecast XML into [`ForecastRecord`]s

use serde::Deserialize;
use tracing::debug;

use crate::error::{ForecastError, Result};
use crate::types::{ForecastRecord, ParsedForecast};
use crate::xml;

/// Root element yr.no answers with instead of `weatherdata` on failure
const ERROR_ROOT: &str = "error";

#[derive(Deserialize)]
struct Document {
    weatherdata: ParsedForecast,
}

/// Parse a raw forecast document
///
/// Fails with [`ForecastError::Parse`] on malformed markup, on an upstream
/// error document and when the forecast structure is missing.
pub fn parse(raw: &[u8]) -> Result<ParsedForecast> {
    let json = xml::to_json(raw).map_err(|reason| {
        debug!(reason = %reason, "Forecast document is not valid XML");
        ForecastError::Parse(reason)
    })?;

    if json.get(ERROR_ROOT).is_some() {
        debug!(document = %json, "Upstream returned an error document");
        return Err(ForecastError::Parse(
            "upstream returned an error document".to_string(),
        ));
    }

    let document: Document = serde_json::from_value(json).map_err(|e| {
        debug!(error = %e, "Forecast document has an unexpected shape");
        ForecastError::Parse(format!("unexpected forecast structure: {e}"))
    })?;

    Ok(document.weatherdata)
}

/// Flatten the tabular wrapper into its time-slices and drop the free-text summary
pub fn normalize(parsed: ParsedForecast) -> ForecastRecord {
    ForecastRecord {
        location: parsed.location,
        credit: parsed.credit,
        links: parsed.links,
        meta: parsed.meta,
        sun: parsed.sun,
        tabular: parsed.forecast.tabular.time.into_vec(),
    }
}
