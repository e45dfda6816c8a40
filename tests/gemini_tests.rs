mod common;

use base64::engine::general_purpose;
use base64::Engine;
use common::{config, fixture, query, replay};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::sync::Arc;
use tradebridge::core::kernel::{HttpRequest, ReplayTransport};
use tradebridge::{ErrorKind, ExchangeError, GeminiConnector, OrderType, TradingApi};

const MARKET: &str = "btcusd";

fn connector(transport: &Arc<ReplayTransport>) -> GeminiConnector {
    let config = config(
        "Gemini",
        &[("key", "gemini-key"), ("secret", "secret")],
        &[("buy-fee", "0.35"), ("sell-fee", "0.35")],
    );
    GeminiConnector::init_with_transport(&config, transport.clone()).unwrap()
}

fn payload(request: &HttpRequest) -> Value {
    let encoded = request.header("X-GEMINI-PAYLOAD").unwrap();
    let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
    serde_json::from_slice(&decoded).unwrap()
}

#[tokio::test]
async fn test_order_book_entries() {
    let transport = replay();
    transport.push_ok(fixture("gemini", "book.json")).await;
    let gemini = connector(&transport);

    let book = gemini.get_market_orders(MARKET).await.unwrap();
    assert_eq!(book.buy_orders.len(), 2);
    assert_eq!(book.sell_orders.len(), 1);
    assert_eq!(book.buy_orders[1].total, dec!(1803.75));

    let request = transport.last_request().await.unwrap();
    assert_eq!(query(&request), "limit_bids=0&limit_asks=0");
}

#[tokio::test]
async fn test_ticker_reads_base_volume_and_timestamp() {
    let transport = replay();
    transport.push_ok(fixture("gemini", "pubticker.json")).await;
    transport.push_ok(fixture("gemini", "ticker_v2.json")).await;
    let gemini = connector(&transport);

    let ticker = gemini.get_ticker(MARKET).await.unwrap();
    assert_eq!(ticker.last, dec!(977.65));
    assert_eq!(ticker.bid, dec!(977.35));
    assert_eq!(ticker.ask, dec!(977.59));
    assert_eq!(ticker.volume, dec!(2210.505328803));
    assert_eq!(ticker.open, Some(dec!(960)));
    assert_eq!(ticker.high, dec!(985));
    assert_eq!(ticker.low, dec!(955.1));
    assert_eq!(ticker.vwap, None);
    assert_eq!(ticker.timestamp, Some(1_483_018_200_000));
}

#[tokio::test]
async fn test_open_orders_are_filtered_by_symbol() {
    let transport = replay();
    transport.push_ok(fixture("gemini", "orders.json")).await;
    let gemini = connector(&transport);

    let orders = gemini.get_your_open_orders(MARKET).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "107421210");
    assert_eq!(orders[0].order_type, OrderType::Sell);
    assert_eq!(orders[0].quantity, dec!(0.75));
    assert_eq!(orders[0].original_quantity, Some(dec!(1)));
    assert_eq!(orders[0].creation_date, 1_547_241_628_042);

    let request = transport.last_request().await.unwrap();
    assert!(request.body.is_none());
    assert_eq!(request.header("X-GEMINI-APIKEY"), Some("gemini-key"));
    assert_eq!(payload(&request)["request"], "/v1/orders");
}

#[tokio::test]
async fn test_create_order_payload() {
    let transport = replay();
    transport.push_ok(fixture("gemini", "new_order.json")).await;
    let gemini = connector(&transport);

    let id = gemini
        .create_order(MARKET, OrderType::Buy, dec!(0.1234567), dec!(3633.004))
        .await
        .unwrap();
    assert_eq!(id, "106817811");

    let request = transport.last_request().await.unwrap();
    let payload = payload(&request);
    assert_eq!(payload["request"], "/v1/order/new");
    assert_eq!(payload["symbol"], "btcusd");
    assert_eq!(payload["side"], "buy");
    assert_eq!(payload["type"], "exchange limit");
    assert_eq!(payload["amount"], "0.123457");
    assert_eq!(payload["price"], "3633");
    assert!(payload["nonce"].is_u64());
}

#[tokio::test]
async fn test_cancel_known_and_unknown_orders() {
    let transport = replay();
    transport.push_ok(fixture("gemini", "cancel_order.json")).await;
    transport.push_ok(fixture("gemini", "order_not_found.json")).await;
    let gemini = connector(&transport);

    assert!(gemini.cancel_order("106817811", MARKET).await.unwrap());
    let request = transport.last_request().await.unwrap();
    assert_eq!(payload(&request)["order_id"], 106_817_811);

    let error = gemini.cancel_order("42", MARKET).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Fatal);
    assert!(error.to_string().contains("OrderNotFound"));
}

#[tokio::test]
async fn test_non_numeric_order_id_is_rejected_before_sending() {
    let transport = replay();
    let gemini = connector(&transport);

    let error = gemini.cancel_order("abc", MARKET).await.unwrap_err();
    assert!(matches!(error, ExchangeError::InvalidParameters(_)));
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_held_balance_is_amount_minus_available() {
    let transport = replay();
    transport.push_ok(fixture("gemini", "balances.json")).await;
    let gemini = connector(&transport);

    let balances = gemini.get_balance_info().await.unwrap();
    assert_eq!(balances.available.get("BTC"), Some(&dec!(1129.10517279)));
    assert_eq!(balances.on_hold.get("BTC"), Some(&dec!(25.51516722)));
    assert_eq!(balances.on_hold.get("USD"), Some(&dec!(4241.17)));
}

#[tokio::test]
async fn test_static_fees() {
    let transport = replay();
    let gemini = connector(&transport);
    let fee = gemini
        .get_percentage_of_buy_order_taken_for_exchange_fee(MARKET)
        .await
        .unwrap();
    assert_eq!(fee, dec!(0.0035));
}
