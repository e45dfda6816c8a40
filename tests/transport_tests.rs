mod common;

use common::{fixture, init_tracing};
use mockito::Matcher;
use rust_decimal_macros::dec;
use tradebridge::core::config::{AuthenticationConfig, ExchangeConfig, NetworkConfig, OtherConfig};
use tradebridge::core::kernel::{
    HttpRequest, HttpTransport, ReqwestTransport, RestClientBuilder, RestClientConfig,
    SignableRequest,
};
use tradebridge::{ErrorKind, ExchangeError, KrakenConnector, TradingApi};

fn kraken_config(base_url: &str, network: NetworkConfig) -> ExchangeConfig {
    ExchangeConfig::new("Kraken")
        .with_base_url(base_url)
        .with_authentication(
            AuthenticationConfig::new()
                .with_item("key", "kraken-key")
                .with_item("secret", "a3Jha2VuLXNlY3JldA=="),
        )
        .with_network(network)
        .with_other(
            OtherConfig::new()
                .with_item("buy-fee", "0.26")
                .with_item("sell-fee", "0.26"),
        )
}

/// A local port nothing listens on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_signed_request_reaches_the_server() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/0/private/Balance")
        .match_header("API-Key", "kraken-key")
        .match_header("API-Sign", Matcher::Any)
        .match_header("Content-Type", "application/x-www-form-urlencoded")
        .match_body(Matcher::Regex(r"^nonce=\d+$".to_string()))
        .with_status(200)
        .with_body(fixture("kraken", "balance.json"))
        .create_async()
        .await;

    let kraken = KrakenConnector::init(&kraken_config(&server.url(), NetworkConfig::default()))
        .unwrap();
    let balances = kraken.get_balance_info().await.unwrap();

    assert_eq!(balances.available.get("XXBT"), Some(&dec!(0.0011)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_codes_are_classified() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/0/public/Ticker")
        .match_query(Matcher::UrlEncoded("pair".into(), "XXBTZUSD".into()))
        .with_status(503)
        .with_body("<html>Service Unavailable</html>")
        .create_async()
        .await;
    server
        .mock("GET", "/0/public/Depth")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("not here")
        .create_async()
        .await;

    let network = NetworkConfig::new(5).with_non_fatal_error_codes([503]);
    let kraken = KrakenConnector::init(&kraken_config(&server.url(), network)).unwrap();

    let unavailable = kraken.get_ticker("XXBTZUSD").await.unwrap_err();
    assert!(matches!(
        unavailable,
        ExchangeError::NetworkError {
            status: Some(503),
            ..
        }
    ));
    assert!(unavailable.is_retryable());

    let missing = kraken.get_market_orders("XXBTZUSD").await.unwrap_err();
    assert!(matches!(missing, ExchangeError::ApiError { code: 404, .. }));
    assert_eq!(missing.kind(), ErrorKind::Fatal);
}

#[tokio::test]
async fn test_connection_refused_is_retryable_only_when_configured() {
    init_tracing();
    let url = closed_port_url();

    let tolerant = KrakenConnector::init(&kraken_config(&url, NetworkConfig::default())).unwrap();
    let error = tolerant.get_ticker("XXBTZUSD").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::RetryableNetwork);

    let strict = KrakenConnector::init(&kraken_config(&url, NetworkConfig::new(5))).unwrap();
    let error = strict.get_ticker("XXBTZUSD").await.unwrap_err();
    assert!(matches!(error, ExchangeError::TransportError(_)));
    assert_eq!(error.kind(), ErrorKind::Fatal);
}

#[tokio::test]
async fn test_reqwest_transport_returns_status_and_body() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/orders/42")
        .match_header("X-Test", "1")
        .with_status(202)
        .with_body("")
        .create_async()
        .await;

    let transport = ReqwestTransport::new(5).unwrap();
    let response = transport
        .send(HttpRequest {
            method: reqwest::Method::DELETE,
            url: format!("{}/orders/42", server.url()),
            headers: vec![("X-Test".to_string(), "1".to_string())],
            body: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status_code, 202);
    assert_eq!(response.status_text, "Accepted");
    assert!(response.is_success());
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_public_call_through_rest_client() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/0/public/Time")
        .with_status(200)
        .with_body(r#"{"error":[],"result":{"unixtime":1420114800}}"#)
        .create_async()
        .await;

    let client = RestClientBuilder::new(RestClientConfig::new(server.url(), "Kraken"))
        .with_network(NetworkConfig::default())
        .build()
        .unwrap();
    let response = client
        .public(SignableRequest::get("/0/public/Time"))
        .await
        .unwrap();
    assert!(response.body.contains("1420114800"));
}
