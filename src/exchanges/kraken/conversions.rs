use super::types::{KrakenOpenOrders, KrakenOrderBook, KrakenTicker};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{market_orders_from_levels, seconds_to_millis};
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub fn convert_order_book(
    market_id: &str,
    book: &KrakenOrderBook,
) -> Result<MarketOrderBook, ExchangeError> {
    Ok(MarketOrderBook {
        market_id: market_id.to_string(),
        buy_orders: market_orders_from_levels(OrderType::Buy, &book.bids)?,
        sell_orders: market_orders_from_levels(OrderType::Sell, &book.asks)?,
    })
}

fn element(field: &str, values: &[Decimal], index: usize) -> Result<Decimal, ExchangeError> {
    values.get(index).copied().ok_or_else(|| {
        ExchangeError::DeserializationError(format!(
            "Ticker field '{}' has no element {}",
            field, index
        ))
    })
}

/// Kraken reports no ticker timestamp.
pub fn convert_ticker(ticker: &KrakenTicker) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last: element("c", &ticker.c, 0)?,
        bid: element("b", &ticker.b, 0)?,
        ask: element("a", &ticker.a, 0)?,
        high: element("h", &ticker.h, 1)?,
        low: element("l", &ticker.l, 1)?,
        open: ticker.o,
        volume: element("v", &ticker.v, 1)?,
        vwap: ticker.p.as_ref().map(|p| element("p", p, 1)).transpose()?,
        timestamp: None,
    })
}

/// Open orders whose description names `altname`. Kraken returns orders for every pair.
pub fn convert_open_orders(
    market_id: &str,
    altname: &str,
    orders: &KrakenOpenOrders,
) -> Result<Vec<OpenOrder>, ExchangeError> {
    let mut open_orders = orders
        .open
        .iter()
        .filter(|(_, order)| order.descr.pair == altname)
        .map(|(txid, order)| {
            Ok(OpenOrder::new(
                txid.clone(),
                market_id,
                order.descr.side.parse()?,
                seconds_to_millis("opentm", order.opentm)?,
                order.descr.price,
                order.vol - order.vol_exec,
                Some(order.vol),
            ))
        })
        .collect::<Result<Vec<_>, ExchangeError>>()?;
    open_orders.sort_by_key(|order| order.creation_date);
    Ok(open_orders)
}

/// Kraken's balance call reports totals only, so `on_hold` stays empty.
pub fn convert_balances(balances: HashMap<String, Decimal>) -> BalanceInfo {
    BalanceInfo::new(balances, HashMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ticker(p: &str) -> KrakenTicker {
        serde_json::from_str(&format!(
            r#"{{"a":["658.1","1","1.000"],"b":["656.5","2","2.000"],"c":["657.999","0.01"],
                "v":["120.5","1530.25"],{}"l":["640.0","638.1"],"h":["660.0","662.5"]}}"#,
            p
        ))
        .unwrap()
    }

    #[test]
    fn test_vwap_uses_the_24_hour_element() {
        let converted = convert_ticker(&ticker(r#""p":["656.1","655.71"],"#)).unwrap();
        assert_eq!(converted.vwap, Some(dec!(655.71)));
    }

    #[test]
    fn test_missing_vwap_is_none() {
        let converted = convert_ticker(&ticker("")).unwrap();
        assert_eq!(converted.vwap, None);
        assert_eq!(converted.last, dec!(657.999));
    }

    #[test]
    fn test_short_vwap_array_fails_the_ticker() {
        let result = convert_ticker(&ticker(r#""p":["650.0"],"#));
        assert!(matches!(result, Err(ExchangeError::DeserializationError(_))));
    }
}
