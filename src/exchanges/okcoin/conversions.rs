use super::types::{OkcoinAccountBalance, OkcoinOrder, OkcoinOrderBook, OkcoinTicker};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{market_orders_from_levels, parse_epoch_millis};
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use std::collections::HashMap;

pub fn convert_order_book(
    market_id: &str,
    book: &OkcoinOrderBook,
) -> Result<MarketOrderBook, ExchangeError> {
    Ok(MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders_from_levels(OrderType::Buy, &book.bids)?,
        sell_orders: market_orders_from_levels(OrderType::Sell, &book.asks)?,
    })
}

pub fn convert_ticker(ticker: &OkcoinTicker) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last: ticker.last,
        bid: ticker.bid_px,
        ask: ticker.ask_px,
        high: ticker.high_24h,
        low: ticker.low_24h,
        open: Some(ticker.open_24h),
        volume: ticker.vol_24h,
        vwap: None,
        timestamp: Some(parse_epoch_millis("ts", &ticker.ts)?),
    })
}

pub fn convert_open_order(order: &OkcoinOrder) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.ord_id.clone(),
        order.inst_id.clone(),
        order.side.parse()?,
        parse_epoch_millis("cTime", &order.c_time)?,
        order.px,
        order.sz - order.acc_fill_sz,
        Some(order.sz),
    ))
}

/// Available and frozen balances per currency.
pub fn convert_balances(balance: &OkcoinAccountBalance) -> BalanceInfo {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for detail in &balance.details {
        available.insert(detail.ccy.clone(), detail.avail_bal);
        on_hold.insert(detail.ccy.clone(), detail.frozen_bal);
    }
    BalanceInfo::new(available, on_hold)
}
