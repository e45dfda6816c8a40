use super::types::{BitstampOrder, BitstampOrderBook, BitstampTicker};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{
    decimal_from_value, market_orders_from_levels, parse_epoch_seconds, parse_utc_datetime_millis,
};
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub fn convert_order_book(
    market_id: &str,
    book: &BitstampOrderBook,
) -> Result<MarketOrderBook, ExchangeError> {
    Ok(MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders_from_levels(OrderType::Buy, &book.bids)?,
        sell_orders: market_orders_from_levels(OrderType::Sell, &book.asks)?,
    })
}

pub fn convert_ticker(ticker: &BitstampTicker) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last: ticker.last,
        bid: ticker.bid,
        ask: ticker.ask,
        high: ticker.high,
        low: ticker.low,
        open: ticker.open,
        volume: ticker.volume,
        vwap: ticker.vwap,
        timestamp: Some(parse_epoch_seconds("timestamp", &ticker.timestamp)?),
    })
}

/// Bitstamp only reports the remaining amount.
pub fn convert_open_order(
    market_id: &str,
    order: &BitstampOrder,
) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.id.clone(),
        market_id,
        order.side,
        parse_utc_datetime_millis("datetime", &order.datetime)?,
        order.price,
        order.amount,
        None,
    ))
}

/// Currency codes are upper-cased (`btc_available` becomes `BTC`).
pub fn convert_balances(balance: &Map<String, Value>) -> Result<BalanceInfo, ExchangeError> {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for (key, value) in balance {
        if let Some(currency) = key.strip_suffix("_available") {
            available.insert(currency.to_uppercase(), decimal_from_value(key, value)?);
        } else if let Some(currency) = key.strip_suffix("_reserved") {
            on_hold.insert(currency.to_uppercase(), decimal_from_value(key, value)?);
        }
    }
    Ok(BalanceInfo::new(available, on_hold))
}

/// The `{market}_fee` entry of the balance response, as a fraction.
pub fn market_fee(
    balance: &Map<String, Value>,
    market_id: &str,
) -> Result<Decimal, ExchangeError> {
    let key = format!("{}_fee", market_id.to_lowercase());
    let percentage = balance.get(&key).ok_or_else(|| {
        ExchangeError::DeserializationError(format!("Balance response has no '{}'", key))
    })?;
    Ok(decimal_from_value(&key, percentage)? / Decimal::ONE_HUNDRED)
}
