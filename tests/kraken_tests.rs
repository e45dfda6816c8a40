mod common;

use common::{body, config, fixture, form_params, form_value, replay};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tradebridge::core::kernel::{ExchangeHttpResponse, TransportError, TransportErrorKind};
use tradebridge::{ErrorKind, ExchangeError, KrakenConnector, OrderType, TradingApi};

const MARKET: &str = "XXBTZUSD";

fn kraken_config(other: &[(&str, &str)]) -> tradebridge::ExchangeConfig {
    let mut items = vec![("buy-fee", "0.26"), ("sell-fee", "0.16")];
    items.extend_from_slice(other);
    config(
        "Kraken",
        &[("key", "kraken-key"), ("secret", "a3Jha2VuLXNlY3JldA==")],
        &items,
    )
}

fn connector(
    transport: &Arc<tradebridge::core::kernel::ReplayTransport>,
    other: &[(&str, &str)],
) -> KrakenConnector {
    KrakenConnector::init_with_transport(&kraken_config(other), transport.clone()).unwrap()
}

#[tokio::test]
async fn test_order_book_is_canonical() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "depth.json")).await;
    let kraken = connector(&transport, &[]);

    let book = kraken.get_market_orders(MARKET).await.unwrap();

    assert_eq!(book.market_id, MARKET);
    assert_eq!(book.buy_orders.len(), 3);
    assert_eq!(book.sell_orders.len(), 2);
    assert!(book.buy_orders.iter().all(|o| o.order_type == OrderType::Buy));
    assert!(book.sell_orders.iter().all(|o| o.order_type == OrderType::Sell));
    assert_eq!(book.sell_orders[0].price, dec!(657.999));
    assert_eq!(book.sell_orders[0].total, dec!(986.9985));
    assert_eq!(book.buy_orders[2].total, dec!(1965.369));

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.url, "https://exchange.test/0/public/Depth?pair=XXBTZUSD");
    assert!(request.header("API-Sign").is_none());
}

#[tokio::test]
async fn test_ticker_without_vwap_or_open() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "ticker_minimal.json")).await;
    transport.push_ok(fixture("kraken", "ticker_minimal.json")).await;
    let kraken = connector(&transport, &[]);

    let first = kraken.get_ticker(MARKET).await.unwrap();
    let second = kraken.get_ticker(MARKET).await.unwrap();

    assert_eq!(first.last, dec!(657.999));
    assert_eq!(first.bid, dec!(656.5));
    assert_eq!(first.ask, dec!(658.1));
    assert_eq!(first.high, dec!(662.5));
    assert_eq!(first.low, dec!(638.1));
    assert_eq!(first.volume, dec!(1530.25));
    assert_eq!(first.vwap, None);
    assert_eq!(first.open, None);
    assert_eq!(first.timestamp, None);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_full_ticker_and_latest_price() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "ticker.json")).await;
    transport.push_ok(fixture("kraken", "ticker.json")).await;
    let kraken = connector(&transport, &[]);

    let ticker = kraken.get_ticker(MARKET).await.unwrap();
    assert_eq!(ticker.vwap, Some(dec!(655.71)));
    assert_eq!(ticker.open, Some(dec!(645)));

    let price = kraken.get_latest_market_price(MARKET).await.unwrap();
    assert_eq!(price, dec!(657.999));
}

#[tokio::test]
async fn test_open_orders_are_filtered_by_pair_and_sorted() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "asset_pairs.json")).await;
    transport.push_ok(fixture("kraken", "open_orders.json")).await;
    transport.push_ok(fixture("kraken", "open_orders.json")).await;
    let kraken = connector(&transport, &[]);

    let orders = kraken.get_your_open_orders(MARKET).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "OB5VMB-B4U2U-DK2WRW");
    assert_eq!(orders[0].order_type, OrderType::Buy);
    assert_eq!(orders[0].creation_date, 1_688_665_400_100);
    assert_eq!(orders[1].id, "OQCLML-BW3P3-BUCMWZ");
    assert_eq!(orders[1].order_type, OrderType::Sell);
    assert_eq!(orders[1].quantity, dec!(1));
    assert_eq!(orders[1].original_quantity, Some(dec!(1.25)));
    assert_eq!(orders[1].total, dec!(700));
    assert!(orders.iter().all(|o| o.market_id == MARKET));

    // The altname is looked up once.
    kraken.get_your_open_orders(MARKET).await.unwrap();
    let requests = transport.requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests
            .iter()
            .filter(|r| r.url.contains("/0/public/AssetPairs"))
            .count(),
        1
    );
}

#[tokio::test]
async fn test_create_order_sends_signed_form() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "add_order.json")).await;
    let kraken = connector(&transport, &[]);

    let txid = kraken
        .create_order(MARKET, OrderType::Buy, dec!(1.25), dec!(657.999))
        .await
        .unwrap();
    assert_eq!(txid, "OUF4EM-FRGI2-MQMWZD");

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.url, "https://exchange.test/0/private/AddOrder");
    assert_eq!(request.header("API-Key"), Some("kraken-key"));
    assert!(request.header("API-Sign").is_some());
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );

    let params = form_params(body(&request));
    let names: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        names,
        ["nonce", "ordertype", "pair", "price", "type", "volume"]
    );
    assert_eq!(form_value(body(&request), "price").as_deref(), Some("657.999"));
    assert_eq!(form_value(body(&request), "type").as_deref(), Some("buy"));
    assert_eq!(form_value(body(&request), "volume").as_deref(), Some("1.25"));
}

#[tokio::test]
async fn test_nonces_increase_across_private_calls() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "balance.json")).await;
    transport.push_ok(fixture("kraken", "balance.json")).await;
    let kraken = connector(&transport, &[]);

    kraken.get_balance_info().await.unwrap();
    kraken.get_balance_info().await.unwrap();

    let nonces: Vec<u64> = transport
        .requests()
        .await
        .iter()
        .map(|r| form_value(body(r), "nonce").unwrap().parse().unwrap())
        .collect();
    assert!(nonces[1] > nonces[0]);
}

#[tokio::test]
async fn test_concurrent_private_calls_get_distinct_nonces() {
    let transport = replay();
    for _ in 0..8 {
        transport.push_ok(fixture("kraken", "balance.json")).await;
    }
    let kraken = connector(&transport, &[]);

    let results = futures::future::join_all((0..8).map(|_| kraken.get_balance_info())).await;
    assert!(results.iter().all(Result::is_ok));

    let mut nonces: Vec<u64> = transport
        .requests()
        .await
        .iter()
        .map(|r| form_value(body(r), "nonce").unwrap().parse().unwrap())
        .collect();
    nonces.sort_unstable();
    nonces.dedup();
    assert_eq!(nonces.len(), 8);
}

#[tokio::test]
async fn test_cancel_and_unknown_order() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "cancel_order.json")).await;
    transport.push_ok(fixture("kraken", "unknown_order.json")).await;
    let kraken = connector(&transport, &[]);

    assert!(kraken.cancel_order("OUF4EM-FRGI2-MQMWZD", MARKET).await.unwrap());

    let error = kraken.cancel_order("NOPE", MARKET).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Fatal);
    assert!(error.to_string().contains("EOrder:Unknown order"));

    let request = transport.last_request().await.unwrap();
    assert_eq!(form_value(body(&request), "txid").as_deref(), Some("NOPE"));
}

#[tokio::test]
async fn test_balances_are_totals() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "balance.json")).await;
    let kraken = connector(&transport, &[]);

    let balances = kraken.get_balance_info().await.unwrap();
    assert_eq!(balances.available.get("ZUSD"), Some(&dec!(171288.6158)));
    assert_eq!(balances.available.get("XETH"), Some(&dec!(49.7)));
    assert!(balances.on_hold.is_empty());
}

#[tokio::test]
async fn test_static_fees_are_fractions() {
    let transport = replay();
    let kraken = connector(&transport, &[]);

    let buy = kraken
        .get_percentage_of_buy_order_taken_for_exchange_fee(MARKET)
        .await
        .unwrap();
    let sell = kraken
        .get_percentage_of_sell_order_taken_for_exchange_fee(MARKET)
        .await
        .unwrap();
    assert_eq!(buy, dec!(0.0026));
    assert_eq!(sell, dec!(0.0016));
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_maintenance_is_fatal_by_default() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "maintenance.json")).await;
    let kraken = connector(&transport, &[]);

    let error = kraken.get_ticker(MARKET).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Fatal);
}

#[tokio::test]
async fn test_maintenance_is_retryable_when_keep_alive_is_enabled() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "maintenance.json")).await;
    transport.push_ok(fixture("kraken", "invalid_key.json")).await;
    let kraken = connector(&transport, &[("keep-alive-during-maintenance", "true")]);

    let error = kraken.get_ticker(MARKET).await.unwrap_err();
    assert!(matches!(error, ExchangeError::NetworkError { status: None, .. }));
    assert!(error.is_retryable());

    let error = kraken.get_balance_info().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Fatal);
}

#[tokio::test]
async fn test_transport_failures_are_classified() {
    let transport = replay();
    transport
        .push_error(TransportError::new(
            TransportErrorKind::Connect,
            "error trying to connect: Connection refused (os error 111)",
        ))
        .await;
    transport
        .push_response(ExchangeHttpResponse::new(502, "<html>Bad Gateway</html>"))
        .await;
    transport
        .push_response(ExchangeHttpResponse::new(403, "forbidden"))
        .await;
    transport.push_ok("<html>not json</html>").await;
    let kraken = connector(&transport, &[]);

    let refused = kraken.get_market_orders(MARKET).await.unwrap_err();
    assert_eq!(refused.kind(), ErrorKind::RetryableNetwork);
    let gateway = kraken.get_market_orders(MARKET).await.unwrap_err();
    assert!(matches!(
        gateway,
        ExchangeError::NetworkError {
            status: Some(502),
            ..
        }
    ));
    let forbidden = kraken.get_market_orders(MARKET).await.unwrap_err();
    assert_eq!(forbidden.kind(), ErrorKind::Fatal);
    let garbage = kraken.get_market_orders(MARKET).await.unwrap_err();
    assert!(matches!(garbage, ExchangeError::DeserializationError(_)));
}

#[test]
fn test_init_fails_without_required_items() {
    let missing_secret = config(
        "Kraken",
        &[("key", "k")],
        &[("buy-fee", "0.26"), ("sell-fee", "0.16")],
    );
    assert!(matches!(
        KrakenConnector::init(&missing_secret),
        Err(ExchangeError::ConfigError(_))
    ));

    let missing_fee = config(
        "Kraken",
        &[("key", "k"), ("secret", "c2VjcmV0")],
        &[("buy-fee", "0.26")],
    );
    assert!(matches!(
        KrakenConnector::init(&missing_fee),
        Err(ExchangeError::ConfigError(_))
    ));

    let bad_toggle = kraken_config(&[("keep-alive-during-maintenance", "sometimes")]);
    assert!(KrakenConnector::init(&bad_toggle).is_err());
}
