//! HTML and script rendering for the widget pages

use chrono::NaiveDateTime;
use yr_forecast::{ForecastRecord, TimeSlice};

/// Shown when the widget form is posted without a URL
pub const MISSING_FORM_URL: &str =
    "Please enter a valid URL. Example:<br/>http://www.yr.no/place/Sweden/Stockholm/Stockholm/";

const PAGE_STYLE: &str = r#"
    body { font-family: Helvetica, Arial, sans-serif; margin: 2rem; color: #222; }
    .error { color: #b00020; }
    table { border-collapse: collapse; }
    th, td { padding: 0.3rem 0.8rem; border-bottom: 1px solid #ddd; text-align: left; }
    code, pre { background: #f4f4f4; padding: 0.2rem 0.4rem; }
    .credit { font-size: 0.8rem; }"#;

fn page(lang: &str, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
{body}
</body>
</html>"#,
        lang = html_escape(lang),
        title = html_escape(title),
        style = PAGE_STYLE,
    )
}

/// Widget creation form; `error_html` is trusted markup
pub fn index_page(error_html: Option<&str>) -> String {
    let error = error_html
        .map(|e| format!(r#"<p class="error">{e}</p>"#))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Polman weather widget</h1>
{error}
<form method="post" action="/">
  <p><label>yr.no URL <input type="text" name="url" size="60" placeholder="http://www.yr.no/place/Norway/Oslo/Oslo/Oslo/"></label></p>
  <p><label>Number of periods <input type="number" name="num" value="10" min="1"></label></p>
  <p><label>Language <input type="text" name="lang" value="en" size="4"></label></p>
  <p><button type="submit">Create widget</button></p>
</form>"#
    );

    page("en", "Polman weather widget", &body)
}

/// A widget ready to embed
#[derive(Debug)]
pub struct Widget<'a> {
    /// Scheme and host of this server, empty for relative links
    pub origin: &'a str,
    /// Tidied forecast document URL
    pub url: &'a str,
    pub num: usize,
    pub lang: &'a str,
}

impl Widget<'_> {
    fn query(&self) -> String {
        format!(
            "url={}&limit={}&lang={}",
            urlencoding::encode(self.url),
            self.num,
            urlencoding::encode(self.lang)
        )
    }

    /// Link to the HTML forecast
    pub fn page_path(&self) -> String {
        format!("{}/forecast?{}", self.origin, self.query())
    }

    /// Source of the embeddable JSONP script
    pub fn script_path(&self) -> String {
        format!(
            "{}/api/forecast?{}&callback=polmanWidget",
            self.origin,
            self.query()
        )
    }

    /// Markup to paste into a page; the renderer script defines `polmanWidget`
    pub fn snippet(&self) -> String {
        format!(
            "<div id=\"polman-widget\"></div>\n<script src=\"{}/javascripts/polman.js\"></script>\n<script src=\"{}\"></script>",
            self.origin,
            self.script_path()
        )
    }
}

/// Confirmation page with the shareable widget links
pub fn created_page(widget: &Widget<'_>) -> String {
    let page_path = html_escape(&widget.page_path());
    let snippet = html_escape(&widget.snippet());

    let body = format!(
        r#"<h1>Your widget is ready</h1>
<p>Forecast for <code>{url}</code>, {num} periods, language <code>{lang}</code>.</p>
<p><a href="{page_path}">Open the forecast</a></p>
<p>Embed it in your page:</p>
<pre>{snippet}</pre>
<p><a href="/">Create another widget</a></p>"#,
        url = html_escape(widget.url),
        num = widget.num,
        lang = html_escape(widget.lang),
    );

    page(widget.lang, "Widget created", &body)
}

/// Forecast table with the first `limit` periods
pub fn forecast_page(record: &ForecastRecord, limit: usize, lang: &str) -> String {
    let rows: String = record
        .upcoming(limit)
        .iter()
        .map(forecast_row)
        .collect();

    let credit = record
        .credit
        .as_ref()
        .and_then(|c| c.link.as_ref())
        .map(|link| {
            format!(
                r#"<p class="credit"><a href="{}">{}</a></p>"#,
                html_escape(&link.url),
                html_escape(&link.text)
            )
        })
        .unwrap_or_default();

    let name = html_escape(&record.location.name);
    let body = format!(
        r#"<h1>{name}</h1>
<table>
  <thead><tr><th>Time</th><th>Weather</th><th>Temperature</th><th>Precipitation</th><th>Wind</th></tr></thead>
  <tbody>
{rows}  </tbody>
</table>
{credit}"#
    );

    page(lang, &record.location.name, &body)
}

fn forecast_row(slice: &TimeSlice) -> String {
    let wind = match &slice.wind_direction {
        Some(direction) => format!("{} m/s {}", slice.wind_speed.mps, direction.code),
        None => format!("{} m/s", slice.wind_speed.mps),
    };

    format!(
        "    <tr><td>{}</td><td>{}</td><td>{}&deg;</td><td>{} mm</td><td>{}</td></tr>\n",
        html_escape(&format_time(&slice.from)),
        html_escape(&slice.symbol.name),
        html_escape(&slice.temperature.value),
        html_escape(&slice.precipitation.value),
        html_escape(&wind),
    )
}

/// `2013-10-18T14:00:00` as `Fri 14:00`; anything else is returned unchanged
pub fn format_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|t| t.format("%a %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// JSONP callbacks may only name a function, optionally namespaced with dots
pub fn is_valid_callback(callback: &str) -> bool {
    !callback.is_empty()
        && callback.len() <= 128
        && callback
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}

/// Wrap `json` in a call to `callback`
pub fn jsonp(callback: &str, json: &str) -> String {
    format!("{callback}({json});")
}

/// Simple HTML escaping.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yr_forecast::transform;

    const OSLO_FORECAST: &str =
        include_str!("../../yr-forecast/tests/fixtures/oslo_forecast.xml");

    fn oslo_record() -> ForecastRecord {
        transform::normalize(transform::parse(OSLO_FORECAST.as_bytes()).unwrap())
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("2013-10-18T14:00:00"), "Fri 14:00");
        assert_eq!(format_time("tomorrow"), "tomorrow");
    }

    #[test]
    fn test_forecast_page_respects_limit() {
        let html = forecast_page(&oslo_record(), 2, "en");
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<h1>Oslo</h1>"));
        assert!(html.contains("Partly cloudy"));
        assert!(html.contains("1.4 m/s SSE"));
        assert!(html.contains("Weather forecast from yr.no"));
    }

    #[test]
    fn test_forecast_page_escapes_upstream_text() {
        let mut record = oslo_record();
        record.location.name = "<script>alert(1)</script>".to_string();
        let html = forecast_page(&record, 1, "en\"><script>");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_index_page_error() {
        assert!(!index_page(None).contains("class=\"error\""));
        let html = index_page(Some(MISSING_FORM_URL));
        assert!(html.contains("Please enter a valid URL. Example:<br/>"));
    }

    #[test]
    fn test_created_page_links() {
        let widget = Widget {
            origin: "",
            url: "http://www.yr.no/place/Norway/Oslo/forecast.xml",
            num: 5,
            lang: "nb",
        };

        assert_eq!(
            widget.page_path(),
            "/forecast?url=http%3A%2F%2Fwww.yr.no%2Fplace%2FNorway%2FOslo%2Fforecast.xml&limit=5&lang=nb"
        );
        assert!(widget.script_path().ends_with("&callback=polmanWidget"));

        let html = created_page(&widget);
        assert!(html.contains("&lt;script src="));
        assert!(html.contains("<html lang=\"nb\">"));
    }

    #[test]
    fn test_widget_links_with_origin() {
        let widget = Widget {
            origin: "http://polman.example.com",
            url: "http://www.yr.no/place/Norway/Oslo/forecast.xml",
            num: 10,
            lang: "en",
        };

        assert!(widget
            .page_path()
            .starts_with("http://polman.example.com/forecast?url="));
        let snippet = widget.snippet();
        assert!(snippet.contains("src=\"http://polman.example.com/javascripts/polman.js\""));
        assert!(snippet.contains("src=\"http://polman.example.com/api/forecast?url="));
    }

    #[test]
    fn test_callback_validation() {
        assert!(is_valid_callback("polmanWidget"));
        assert!(is_valid_callback("jQuery1910_$cb.done"));
        assert!(!is_valid_callback(""));
        assert!(!is_valid_callback("alert(1)"));
        assert!(!is_valid_callback("a;b"));
    }

    #[test]
    fn test_jsonp() {
        assert_eq!(jsonp("cb", "{\"a\":1}"), "cb({\"a\":1});");
    }
}
