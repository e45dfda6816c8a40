mod common;

use common::{config, fixture, json_body, replay};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tradebridge::core::kernel::ReplayTransport;
use tradebridge::{BitfinexConnector, ErrorKind, ExchangeError, OrderType, TradingApi};

const MARKET: &str = "btcusd";

fn connector(transport: &Arc<ReplayTransport>, use_global_fee: &str) -> BitfinexConnector {
    let config = config(
        "Bitfinex",
        &[("key", "bfx-key"), ("secret", "secret")],
        &[("use-global-trading-fee", use_global_fee)],
    );
    BitfinexConnector::init_with_transport(&config, transport.clone()).unwrap()
}

#[tokio::test]
async fn test_order_book_and_ticker() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "book.json")).await;
    transport.push_ok(fixture("bitfinex", "pubticker.json")).await;
    let bitfinex = connector(&transport, "true");

    let book = bitfinex.get_market_orders(MARKET).await.unwrap();
    assert_eq!(book.buy_orders.len(), 2);
    assert_eq!(book.sell_orders.len(), 1);
    assert_eq!(book.buy_orders[1].total, dec!(1149));

    let ticker = bitfinex.get_ticker(MARKET).await.unwrap();
    assert_eq!(ticker.last, dec!(244.82));
    assert_eq!(ticker.volume, dec!(7842.11542563));
    assert_eq!(ticker.open, None);
    assert_eq!(ticker.vwap, None);
    assert_eq!(ticker.timestamp, Some(1_444_253_422_348));
}

#[tokio::test]
async fn test_private_payload_is_sent_as_body_and_header() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "orders.json")).await;
    let bitfinex = connector(&transport, "true");

    let orders = bitfinex.get_your_open_orders(MARKET).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "448411365");
    assert_eq!(orders[0].quantity, dec!(0.01));
    assert_eq!(orders[0].original_quantity, Some(dec!(0.02)));
    assert_eq!(orders[0].creation_date, 1_444_276_597_000);

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.header("X-BFX-APIKEY"), Some("bfx-key"));
    assert!(request.header("X-BFX-SIGNATURE").is_some());
    let body = json_body(&request);
    assert_eq!(body["request"], "/v1/orders");
    assert!(body["nonce"].is_string());
}

#[tokio::test]
async fn test_create_order_body() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "new_order.json")).await;
    let bitfinex = connector(&transport, "true");

    let id = bitfinex
        .create_order(MARKET, OrderType::Buy, dec!(0.01), dec!(0.123456789))
        .await
        .unwrap();
    assert_eq!(id, "448364249");

    let request = transport.last_request().await.unwrap();
    let body = json_body(&request);
    assert_eq!(body["symbol"], "btcusd");
    assert_eq!(body["amount"], "0.01");
    assert_eq!(body["price"], "0.12345679");
    assert_eq!(body["exchange"], "bitfinex");
    assert_eq!(body["side"], "buy");
    assert_eq!(body["type"], "exchange limit");
}

#[tokio::test]
async fn test_cancel_known_and_unknown_orders() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "cancel_order.json")).await;
    transport.push_ok(fixture("bitfinex", "order_not_found.json")).await;
    let bitfinex = connector(&transport, "true");

    assert!(bitfinex.cancel_order("446915287", MARKET).await.unwrap());
    let error = bitfinex.cancel_order("1", MARKET).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Fatal);
    assert!(error.to_string().contains("could not be cancelled"));
}

#[tokio::test]
async fn test_only_exchange_wallet_is_reported() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "balances.json")).await;
    let bitfinex = connector(&transport, "true");

    let balances = bitfinex.get_balance_info().await.unwrap();
    assert_eq!(balances.available.get("BTC"), Some(&dec!(0.75)));
    assert_eq!(balances.on_hold.get("BTC"), Some(&dec!(0.25)));
    assert_eq!(balances.available.get("USD"), Some(&dec!(100.5)));
    assert_eq!(balances.available.len(), 2);
}

#[tokio::test]
async fn test_global_fee_toggle() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "account_infos.json")).await;
    let bitfinex = connector(&transport, "true");

    let fee = bitfinex
        .get_percentage_of_buy_order_taken_for_exchange_fee("ethusd")
        .await
        .unwrap();
    assert_eq!(fee, dec!(0.002));
}

#[tokio::test]
async fn test_per_market_fee_toggle() {
    let transport = replay();
    transport.push_ok(fixture("bitfinex", "account_infos.json")).await;
    transport.push_ok(fixture("bitfinex", "account_infos.json")).await;
    let bitfinex = connector(&transport, "false");

    let fee = bitfinex
        .get_percentage_of_sell_order_taken_for_exchange_fee("ethusd")
        .await
        .unwrap();
    assert_eq!(fee, dec!(0.0025));

    let error = bitfinex
        .get_percentage_of_sell_order_taken_for_exchange_fee("xrpusd")
        .await
        .unwrap_err();
    assert!(matches!(error, ExchangeError::DeserializationError(_)));
}

#[test]
fn test_init_requires_fee_toggle() {
    let missing = config("Bitfinex", &[("key", "k"), ("secret", "s")], &[]);
    assert!(matches!(
        BitfinexConnector::init(&missing),
        Err(ExchangeError::ConfigError(_))
    ));

    let invalid = config(
        "Bitfinex",
        &[("key", "k"), ("secret", "s")],
        &[("use-global-trading-fee", "yes")],
    );
    assert!(BitfinexConnector::init(&invalid).is_err());
}
