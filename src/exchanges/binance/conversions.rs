use super::types::{BinanceAccountInfo, BinanceOrder, BinanceOrderBook, BinanceTicker24h};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::market_orders_from_levels;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub fn convert_order_book(
    market_id: &str,
    book: &BinanceOrderBook,
) -> Result<MarketOrderBook, ExchangeError> {
    Ok(MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders_from_levels(OrderType::Buy, &book.bids)?,
        sell_orders: market_orders_from_levels(OrderType::Sell, &book.asks)?,
    })
}

pub fn convert_ticker(ticker: &BinanceTicker24h) -> Ticker {
    Ticker {
        last: ticker.last_price,
        bid: ticker.bid_price,
        ask: ticker.ask_price,
        high: ticker.high_price,
        low: ticker.low_price,
        open: Some(ticker.open_price),
        volume: ticker.volume,
        vwap: Some(ticker.weighted_avg_price),
        timestamp: Some(ticker.close_time),
    }
}

pub fn convert_open_order(order: &BinanceOrder) -> Result<OpenOrder, ExchangeError> {
    Ok(OpenOrder::new(
        order.order_id.to_string(),
        order.symbol.clone(),
        order.side.parse()?,
        order.time,
        order.price,
        order.orig_qty - order.executed_qty,
        Some(order.orig_qty),
    ))
}

/// Every reported asset is kept, including zero balances.
pub fn convert_balances(account: &BinanceAccountInfo) -> BalanceInfo {
    let mut available = HashMap::new();
    let mut on_hold = HashMap::new();
    for balance in &account.balances {
        available.insert(balance.asset.clone(), balance.free);
        on_hold.insert(balance.asset.clone(), balance.locked);
    }
    BalanceInfo::new(available, on_hold)
}

/// `takerCommission` is in units of 0.01 %.
pub fn taker_fee(account: &BinanceAccountInfo) -> Decimal {
    account.taker_commission / Decimal::from(10_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_taker_commission_is_basis_points_of_a_percent() {
        let account: BinanceAccountInfo = serde_json::from_str(
            r#"{"takerCommission": 10, "balances": [
                {"asset": "BTC", "free": "0.5", "locked": "0.1"},
                {"asset": "ETH", "free": "0.00000000", "locked": "0.00000000"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(taker_fee(&account), dec!(0.001));

        let balances = convert_balances(&account);
        assert_eq!(balances.available.get("BTC"), Some(&dec!(0.5)));
        assert_eq!(balances.on_hold.get("BTC"), Some(&dec!(0.1)));
        assert_eq!(balances.available.get("ETH"), Some(&Decimal::ZERO));
        assert_eq!(balances.on_hold.get("ETH"), Some(&Decimal::ZERO));
    }
}
