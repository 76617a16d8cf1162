//! HTTP server for the widget endpoints
//!
//! Provides the widget form on `/`, `/forecast` (HTML), `/api/forecast`
//! (JSON or JSONP) and `/health`. Everything else is served from the
//! public asset directory.

use crate::render::{self, Widget, MISSING_FORM_URL};
use crate::types::{CreateWidgetForm, ForecastQuery, ForecastResponse, HealthResponse};
use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use forecast_cache::ForecastCache;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use yr_forecast::{ErrorKind, ForecastError, ForecastKey, ForecastRecord};

/// Header telling whether a forecast came from the cache
pub const CACHE_HIT_HEADER: &str = "x-polman-cache-hit";

const MISSING_URL: &str = "Missing url to forecast xml. Example: ?url=http://www.yr.no/place/Norway/Telemark/Sauherad/Gvarv/forecast.xml";

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: ForecastCache,
    pub public_dir: PathBuf,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(cache: ForecastCache, public_dir: PathBuf) -> Self {
        Self {
            cache,
            public_dir,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    let assets = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/", get(index).post(create_widget))
        .route("/forecast", get(forecast_html))
        .route("/api/forecast", get(forecast_api))
        .route("/health", get(health))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: state.cache.stats(),
    })
}

/// Widget creation form
async fn index() -> Html<String> {
    Html(render::index_page(None))
}

/// Build a shareable widget from the posted form; nothing is stored
async fn create_widget(headers: HeaderMap, Form(form): Form<CreateWidgetForm>) -> Html<String> {
    let Some(url) = form.url() else {
        return Html(render::index_page(Some(MISSING_FORM_URL)));
    };

    let origin = request_origin(&headers);
    let url = yr_forecast::tidy_url(url);
    let widget = Widget {
        origin: &origin,
        url: &url,
        num: form.num(),
        lang: form.lang(),
    };
    info!(url = %url, num = widget.num, lang = widget.lang, "Created widget");

    Html(render::created_page(&widget))
}

/// Scheme and host the client used to reach us, honouring a TLS-terminating
/// proxy's `X-Forwarded-Proto`. Empty without a `Host` header.
fn request_origin(headers: &HeaderMap) -> String {
    let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) else {
        return String::new();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|proto| proto.to_str().ok())
        .and_then(|proto| proto.split(',').next())
        .map(str::trim)
        .filter(|proto| proto.eq_ignore_ascii_case("https"))
        .map_or("http", |_| "https");

    format!("{scheme}://{host}")
}

/// Forecast rendered as an HTML table
async fn forecast_html(
    State(state): State<SharedState>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    let (record, hit) = match load_forecast(&state, &query).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let html = render::forecast_page(&record, query.limit(), query.lang());
    with_cache_header(Html(html).into_response(), hit)
}

/// Forecast as JSON, or JSONP when a callback is given
async fn forecast_api(
    State(state): State<SharedState>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    let callback = query.callback.as_deref().map(str::trim).filter(|c| !c.is_empty());
    if let Some(callback) = callback {
        if !render::is_valid_callback(callback) {
            return (StatusCode::BAD_REQUEST, "Invalid callback name").into_response();
        }
    }

    let (record, hit) = match load_forecast(&state, &query).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let json = match serde_json::to_string(&ForecastResponse::new(&record, query.limit())) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize forecast");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Could not render forecast")
                .into_response();
        }
    };
    let body = match callback {
        Some(callback) => render::jsonp(callback, &json),
        None => json,
    };

    let response = (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        body,
    )
        .into_response();
    with_cache_header(response, hit)
}

/// Validate the query and read the forecast through the cache
///
/// A missing URL is rejected before the cache is consulted.
async fn load_forecast(
    state: &ServerState,
    query: &ForecastQuery,
) -> Result<(ForecastRecord, bool), Response> {
    let url = query
        .url()
        .ok_or_else(|| (StatusCode::BAD_REQUEST, MISSING_URL).into_response())?;

    let key = ForecastKey::from_url(url).map_err(|e| error_response(&e))?;

    state.cache.get_or_fetch(&key).await.map_err(|e| {
        warn!(key = %key, error = ?e, "Failed to load forecast");
        error_response(&e)
    })
}

fn error_response(err: &ForecastError) -> Response {
    let status = match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Transport | ErrorKind::Parse => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string()).into_response()
}

fn with_cache_header(mut response: Response, hit: bool) -> Response {
    let value = if hit { "true" } else { "false" };
    response
        .headers_mut()
        .insert(CACHE_HIT_HEADER, HeaderValue::from_static(value));
    response
}
