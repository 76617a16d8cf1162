//! Request and response types for the widget server

use forecast_cache::CacheStats;
use serde::{Deserialize, Serialize};
use yr_forecast::{Credit, ForecastRecord, Location, Meta, Sun, TimeSlice};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_LANG: &str = "en";

/// Query parameters of the forecast endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    /// JSONP wrapper function for `/api/forecast`
    #[serde(default)]
    pub callback: Option<String>,
}

impl ForecastQuery {
    /// Number of time-slices to render; unparsable values use the default
    pub fn limit(&self) -> usize {
        parse_count(self.limit.as_deref())
    }

    pub fn lang(&self) -> &str {
        non_blank(self.lang.as_deref()).unwrap_or(DEFAULT_LANG)
    }

    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }
}

/// Widget creation form posted to `/`
#[derive(Debug, Default, Deserialize)]
pub struct CreateWidgetForm {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub num: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl CreateWidgetForm {
    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    pub fn num(&self) -> usize {
        parse_count(self.num.as_deref())
    }

    pub fn lang(&self) -> &str {
        non_blank(self.lang.as_deref()).unwrap_or(DEFAULT_LANG)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_count(value: Option<&str>) -> usize {
    non_blank(value)
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LIMIT)
}

/// Forecast payload of `/api/forecast`
#[derive(Debug, Serialize)]
pub struct ForecastResponse<'a> {
    pub location: &'a Location,
    pub credit: Option<&'a Credit>,
    pub meta: Option<&'a Meta>,
    pub sun: Option<&'a Sun>,
    pub tabular: &'a [TimeSlice],
}

impl<'a> ForecastResponse<'a> {
    pub fn new(record: &'a ForecastRecord, limit: usize) -> Self {
        Self {
            location: &record.location,
            credit: record.credit.as_ref(),
            meta: record.meta.as_ref(),
            sun: record.sun.as_ref(),
            tabular: record.upcoming(limit),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults() {
        let query = ForecastQuery::default();
        assert_eq!(query.limit(), 10);
        assert_eq!(query.lang(), "en");
        assert!(query.url().is_none());

        let query = ForecastQuery {
            limit: Some("many".to_string()),
            ..Default::default()
        };
        assert_eq!(query.limit(), 10);

        let query = ForecastQuery {
            limit: Some(" 3 ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.limit(), 3);
    }

    #[test]
    fn test_blank_url_is_missing() {
        let query = ForecastQuery {
            url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.url().is_none());

        let form = CreateWidgetForm {
            url: Some(String::new()),
            ..Default::default()
        };
        assert!(form.url().is_none());
    }

    #[test]
    fn test_form_defaults() {
        let form = CreateWidgetForm {
            url: Some("www.yr.no/place/Norway/Oslo".to_string()),
            num: None,
            lang: Some("nb".to_string()),
        };
        assert_eq!(form.url(), Some("www.yr.no/place/Norway/Oslo"));
        assert_eq!(form.num(), 10);
        assert_eq!(form.lang(), "nb");
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            uptime_secs: 3600,
            cache: CacheStats {
                backend: "memory".to_string(),
                ttl_secs: 900,
                hits: 500,
                misses: 50,
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("3600"));
        assert!(json.contains("\"hits\":500"));
    }
}
