//! Forecast URL normalization

use std::fmt;

use crate::error::{ForecastError, Result};

const FORECAST_DOCUMENT: &str = "forecast.xml";

/// Normalized `host/path` identifier of a forecast document
///
/// Used both as the cache key and as the upstream request path. The scheme is
/// dropped, so `http://www.yr.no/...` and `www.yr.no/...` share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    key: String,
    path_start: usize,
}

impl ForecastKey {
    /// Derive a key from a user-supplied forecast URL
    pub fn from_url(raw: &str) -> Result<Self> {
        let without_scheme = strip_scheme(raw.trim());
        if without_scheme.is_empty() {
            return Err(ForecastError::Validation(
                "Missing url to forecast xml".to_string(),
            ));
        }

        let (host, path) = match without_scheme.find('/') {
            Some(idx) => without_scheme.split_at(idx),
            None => (without_scheme, "/"),
        };
        if host.is_empty() {
            return Err(ForecastError::Validation(format!(
                "Invalid forecast url: {raw}"
            )));
        }

        let host = host.to_ascii_lowercase();
        let path = with_forecast_document(path.to_string());

        Ok(Self {
            path_start: host.len(),
            key: format!("{host}{path}"),
        })
    }

    /// The full key, `host/path`
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Request path on the upstream host, always starting with `/`
    pub fn path(&self) -> &str {
        &self.key[self.path_start..]
    }
}

impl fmt::Display for ForecastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Tidy a URL posted to the widget form: force an `http://` prefix and point
/// it at the forecast document
pub fn tidy_url(url: &str) -> String {
    let url = url.trim();
    let url = if has_prefix_ignore_case(url, "http://") || has_prefix_ignore_case(url, "https://")
    {
        url.to_string()
    } else {
        format!("http://{url}")
    };
    with_forecast_document(url)
}

fn with_forecast_document(mut url: String) -> String {
    if url.contains(".xml") {
        return url;
    }
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(FORECAST_DOCUMENT);
    url
}

fn strip_scheme(url: &str) -> &str {
    for scheme in ["http://", "https://"] {
        if has_prefix_ignore_case(url, scheme) {
            return &url[scheme.len()..];
        }
    }
    url
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_scheme_does_not_change_key() {
        let bare = ForecastKey::from_url("www.yr.no/place/Norway/Oslo/forecast.xml").unwrap();
        let http = ForecastKey::from_url("http://www.yr.no/place/Norway/Oslo/forecast.xml").unwrap();
        let https =
            ForecastKey::from_url("HTTPS://www.yr.no/place/Norway/Oslo/forecast.xml").unwrap();

        assert_eq!(bare, http);
        assert_eq!(bare, https);
        assert_eq!(bare.as_str(), "www.yr.no/place/Norway/Oslo/forecast.xml");
    }

    #[test]
    fn test_forecast_document_appended() {
        let key = ForecastKey::from_url("www.yr.no/place/Norway/Oslo").unwrap();
        assert_eq!(key.path(), "/place/Norway/Oslo/forecast.xml");

        let with_slash = ForecastKey::from_url("http://www.yr.no/place/Norway/Oslo/").unwrap();
        assert_eq!(key, with_slash);
    }

    #[test]
    fn test_host_and_path_split() {
        let key = ForecastKey::from_url("WWW.YR.NO/place/Sweden/Stockholm/forecast.xml").unwrap();
        assert_eq!(key.as_str(), "www.yr.no/place/Sweden/Stockholm/forecast.xml");
        assert_eq!(key.path(), "/place/Sweden/Stockholm/forecast.xml");
    }

    #[test]
    fn test_bare_host() {
        let key = ForecastKey::from_url("www.yr.no").unwrap();
        assert_eq!(key.as_str(), "www.yr.no/forecast.xml");
        assert_eq!(key.path(), "/forecast.xml");
    }

    #[test]
    fn test_empty_urls_rejected() {
        for raw in ["", "   ", "http://", "/place/Norway/Oslo"] {
            let err = ForecastKey::from_url(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{raw:?}");
        }
    }

    #[test]
    fn test_tidy_url() {
        assert_eq!(
            tidy_url("www.yr.no/place/Sweden/Stockholm/Stockholm"),
            "http://www.yr.no/place/Sweden/Stockholm/Stockholm/forecast.xml"
        );
        assert_eq!(
            tidy_url("HTTP://www.yr.no/place/Sweden/Stockholm/Stockholm/"),
            "HTTP://www.yr.no/place/Sweden/Stockholm/Stockholm/forecast.xml"
        );
        assert_eq!(
            tidy_url("http://www.yr.no/place/Norway/Oslo/forecast_hour_by_hour.xml"),
            "http://www.yr.no/place/Norway/Oslo/forecast_hour_by_hour.xml"
        );
    }
}
