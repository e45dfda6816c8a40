use super::types::{ItbitOrder, ItbitOrderBook, ItbitTicker, ItbitWallet};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{market_orders_from_levels, parse_iso8601_millis};
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use std::collections::HashMap;

pub fn convert_order_book(
    market_id: &str,
    book: &ItbitOrderBook,
) -> Result<MarketOrderBook, ExchangeError> {
    Ok(MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders_from_levels(OrderType::Buy, &book.bids)?,
        sell_orders: market_orders_from_levels(OrderType::Sell, &book.asks)?,
    })
}

pub fn convert_ticker(ticker: &ItbitTicker) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last: ticker.last_price,
        bid: ticker.bid,
        ask: ticker.ask,
        high: ticker.high_24h,
        low: ticker.low_24h,
        open: ticker.open_today,
        volume: ticker.volume_24h,
        vwap: ticker.vwap_24h,
        timestamp: Some(parse_iso8601_millis("serverTimeUTC", &ticker.server_time_utc)?),
    })
}

pub fn convert_open_order(order: &ItbitOrder) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.id.clone(),
        order.instrument.clone(),
        order.side.parse()?,
        parse_iso8601_millis("createdTime", &order.created_time)?,
        order.price,
        order.amount - order.amount_filled,
        Some(order.amount),
    ))
}

pub fn convert_balances(wallet: &ItbitWallet) -> BalanceInfo {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for balance in &wallet.balances {
        available.insert(balance.currency.clone(), balance.available_balance);
        on_hold.insert(
            balance.currency.clone(),
            balance.total_balance - balance.available_balance,
        );
    }
    BalanceInfo::new(available, on_hold)
}
