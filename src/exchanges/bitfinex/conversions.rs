use super::types::{
    BitfinexAccountInfo, BitfinexBalance, BitfinexBookEntry, BitfinexOrder, BitfinexOrderBook,
    BitfinexTicker,
};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::parse_epoch_seconds;
use crate::core::types::{
    BalanceInfo, MarketOrder, MarketOrderBook, OpenOrder, OrderType, Ticker,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

const EXCHANGE_WALLET: &str = "exchange";

fn market_orders(order_type: OrderType, entries: &[BitfinexBookEntry]) -> Vec<MarketOrder> {
    entries
        .iter()
        .map(|entry| MarketOrder::new(order_type, entry.price, entry.amount))
        .collect()
}

pub fn convert_order_book(market_id: &str, book: &BitfinexOrderBook) -> MarketOrderBook {
    MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders(OrderType::Buy, &book.bids),
        sell_orders: market_orders(OrderType::Sell, &book.asks),
    }
}

/// The v1 ticker has neither an opening price nor a VWAP.
pub fn convert_ticker(ticker: &BitfinexTicker) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last: ticker.last_price,
        bid: ticker.bid,
        ask: ticker.ask,
        high: ticker.high,
        low: ticker.low,
        open: None,
        volume: ticker.volume,
        vwap: None,
        timestamp: Some(parse_epoch_seconds("timestamp", &ticker.timestamp)?),
    })
}

pub fn convert_open_order(order: &BitfinexOrder) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.id.to_string(),
        order.symbol.clone(),
        order.side.parse()?,
        parse_epoch_seconds("timestamp", &order.timestamp)?,
        order.price,
        order.remaining_amount,
        Some(order.original_amount),
    ))
}

/// Only the exchange wallet funds trading. Currency codes are upper-cased.
pub fn convert_balances(balances: &[BitfinexBalance]) -> BalanceInfo {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for balance in balances.iter().filter(|b| b.wallet == EXCHANGE_WALLET) {
        let currency = balance.currency.to_uppercase();
        available.insert(currency.clone(), balance.available);
        on_hold.insert(currency, balance.amount - balance.available);
    }
    BalanceInfo::new(available, on_hold)
}

/// Taker fee as a fraction: the account-wide rate, or the rate for the market's base
/// currency (the first three letters of the symbol).
pub fn taker_fee(
    info: &BitfinexAccountInfo,
    market_id: &str,
    use_global_fee: bool,
) -> Result<Decimal, ExchangeError> {
    let percentage = if use_global_fee {
        info.taker_fees
    } else {
        let base = market_id.get(..3).unwrap_or(market_id).to_uppercase();
        info.fees
            .iter()
            .find(|fee| fee.pairs.eq_ignore_ascii_case(&base))
            .map(|fee| fee.taker_fees)
            .ok_or_else(|| {
                ExchangeError::DeserializationError(format!(
                    "Bitfinex account info has no fee entry for {}",
                    base
                ))
            })?
    };
    Ok(percentage / Decimal::ONE_HUNDRED)
}
