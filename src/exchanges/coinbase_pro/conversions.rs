use super::types::{
    CoinbaseAccount, CoinbaseOrder, CoinbaseOrderBook, CoinbaseStats, CoinbaseTicker,
};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{market_orders_from_levels, parse_iso8601_millis};
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use std::collections::HashMap;

pub fn convert_order_book(
    market_id: &str,
    book: &CoinbaseOrderBook,
) -> Result<MarketOrderBook, ExchangeError> {
    Ok(MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders_from_levels(OrderType::Buy, &book.bids)?,
        sell_orders: market_orders_from_levels(OrderType::Sell, &book.asks)?,
    })
}

/// Last, bid, ask and time from the ticker; range, open and volume from the 24h stats.
pub fn convert_ticker(
    ticker: &CoinbaseTicker,
    stats: &CoinbaseStats,
) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last: ticker.price,
        bid: ticker.bid,
        ask: ticker.ask,
        high: stats.high,
        low: stats.low,
        open: stats.open,
        volume: stats.volume,
        vwap: None,
        timestamp: Some(parse_iso8601_millis("time", &ticker.time)?),
    })
}

pub fn convert_open_order(order: &CoinbaseOrder) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.id.clone(),
        order.product_id.clone(),
        order.side.parse()?,
        parse_iso8601_millis("created_at", &order.created_at)?,
        order.price,
        order.size - order.filled_size,
        Some(order.size),
    ))
}

pub fn convert_balances(accounts: &[CoinbaseAccount]) -> BalanceInfo {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for account in accounts {
        available.insert(account.currency.clone(), account.available);
        on_hold.insert(account.currency.clone(), account.hold);
    }
    BalanceInfo::new(available, on_hold)
}
