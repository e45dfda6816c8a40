use super::types::{
    GeminiBalance, GeminiBookEntry, GeminiOrder, GeminiOrderBook, GeminiPubTicker,
    GeminiTickerV2,
};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{decimal_from_value, parse_epoch_millis};
use crate::core::types::{
    BalanceInfo, MarketOrder, MarketOrderBook, OpenOrder, OrderType, Ticker,
};
use serde_json::Value;
use std::collections::HashMap;

fn market_orders(order_type: OrderType, entries: &[GeminiBookEntry]) -> Vec<MarketOrder> {
    entries
        .iter()
        .map(|entry| MarketOrder::new(order_type, entry.price, entry.amount))
        .collect()
}

pub fn convert_order_book(market_id: &str, book: &GeminiOrderBook) -> MarketOrderBook {
    MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders(OrderType::Buy, &book.bids),
        sell_orders: market_orders(OrderType::Sell, &book.asks),
    }
}

/// Price fields from the v1 ticker, open and range from the v2 ticker. Volume is the base
/// currency entry of the v1 volume map, the key the symbol starts with.
pub fn convert_ticker(
    market_id: &str,
    ticker: &GeminiPubTicker,
    ticker_v2: &GeminiTickerV2,
) -> Result<Ticker, ExchangeError> {
    let symbol = market_id.to_uppercase();
    let (base, volume) = ticker
        .volume
        .iter()
        .find(|(currency, _)| *currency != "timestamp" && symbol.starts_with(currency.as_str()))
        .ok_or_else(|| {
            ExchangeError::DeserializationError(format!(
                "Gemini ticker has no base currency volume for {}",
                market_id
            ))
        })?;
    let timestamp = match ticker.volume.get("timestamp") {
        Some(Value::Number(millis)) => Some(millis.as_i64().ok_or_else(|| {
            ExchangeError::DeserializationError(format!("Invalid timestamp: {}", millis))
        })?),
        Some(Value::String(millis)) => Some(parse_epoch_millis("timestamp", millis)?),
        _ => None,
    };

    Ok(Ticker {
        last: ticker.last,
        bid: ticker.bid,
        ask: ticker.ask,
        high: ticker_v2.high,
        low: ticker_v2.low,
        open: ticker_v2.open,
        volume: decimal_from_value(base, volume)?,
        vwap: None,
        timestamp,
    })
}

pub fn convert_open_order(order: &GeminiOrder) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.order_id.clone(),
        order.symbol.clone(),
        order.side.parse()?,
        order.timestampms,
        order.price,
        order.remaining_amount,
        Some(order.original_amount),
    ))
}

/// Held funds are the difference between the total and the available amount.
pub fn convert_balances(balances: &[GeminiBalance]) -> BalanceInfo {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for balance in balances {
        available.insert(balance.currency.clone(), balance.available);
        on_hold.insert(balance.currency.clone(), balance.amount - balance.available);
    }
    BalanceInfo::new(available, on_hold)
}
