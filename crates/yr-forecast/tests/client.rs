use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yr_forecast::{ErrorKind, ForecastError, ForecastKey, TransportError, YrClient};

const OSLO_FORECAST: &str = include_str!("fixtures/oslo_forecast.xml");

#[tokio::test]
async fn test_forecast_fetches_key_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/Norway/Oslo/forecast.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OSLO_FORECAST))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = YrClient::with_base_url(&mock_server.uri());
    let key = ForecastKey::from_url("http://www.yr.no/place/Norway/Oslo").unwrap();
    let record = client.forecast(&key).await.unwrap();

    assert_eq!(record.location.name, "Oslo");
    assert_eq!(record.tabular.len(), 4);
}

#[tokio::test]
async fn test_failure_status_is_bad_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<error/>"))
        .mount(&mock_server)
        .await;

    let client = YrClient::with_base_url(&mock_server.uri());
    let key = ForecastKey::from_url("www.yr.no/place/Atlantis/forecast.xml").unwrap();
    let err = client.forecast(&key).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(
        err,
        ForecastError::Transport(TransportError::BadStatus { status, .. }) if status.as_u16() == 404
    ));
    assert_eq!(
        err.to_string(),
        "Could not retrieve data from www.yr.no/place/Atlantis/forecast.xml - are you sure this is a valid URL?"
    );
}

#[tokio::test]
async fn test_unreachable_host() {
    // Nothing listens on the discard port
    let client = YrClient::with_base_url("http://127.0.0.1:9");
    let key = ForecastKey::from_url("www.yr.no/place/Norway/Oslo/forecast.xml").unwrap();
    let err = client.fetch(&key).await.unwrap_err();

    assert!(matches!(
        err,
        ForecastError::Transport(TransportError::Unreachable(_))
    ));
    assert_eq!(err.to_string(), "Could not fetch data from yr.no");
}

#[tokio::test]
async fn test_error_document_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<error><message>No such place</message></error>"),
        )
        .mount(&mock_server)
        .await;

    let client = YrClient::with_base_url(&mock_server.uri());
    let key = ForecastKey::from_url("www.yr.no/place/Norway/Oslo/forecast.xml").unwrap();
    let err = client.forecast(&key).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.to_string(), "Error: Could not parse XML from yr.no");
}
