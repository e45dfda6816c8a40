use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    /// Lowercase wire form used by most exchanges (`buy` / `sell`).
    pub const fn as_lowercase(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    pub const fn as_uppercase(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_uppercase())
    }
}

/// Accepts `buy` / `sell` in any case.
impl FromStr for OrderType {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ExchangeError::DeserializationError(format!(
                "Unknown order side: {}",
                other
            ))),
        }
    }
}

/// Snapshot of a market's 24h statistics, created fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub last: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// Not every exchange reports an opening price.
    pub open: Option<Decimal>,
    pub volume: Decimal,
    pub vwap: Option<Decimal>,
    /// Epoch milliseconds, when the exchange reports one.
    pub timestamp: Option<i64>,
}

/// One price level of an order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrder {
    pub order_type: OrderType,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Always `price * quantity`, computed locally.
    pub total: Decimal,
}

impl MarketOrder {
    pub fn new(order_type: OrderType, price: Decimal, quantity: Decimal) -> Self {
        Self {
            order_type,
            price,
            quantity,
            total: price * quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderBook {
    pub market_id: String,
    /// Best (highest) bid first.
    pub buy_orders: Vec<MarketOrder>,
    /// Best (lowest) ask first.
    pub sell_orders: Vec<MarketOrder>,
}

/// The exchange's current view of one of our resting orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub id: String,
    pub market_id: String,
    pub order_type: OrderType,
    /// Epoch milliseconds.
    pub creation_date: i64,
    pub price: Decimal,
    /// Remaining quantity.
    pub quantity: Decimal,
    pub original_quantity: Option<Decimal>,
    pub total: Decimal,
}

impl OpenOrder {
    pub fn new(
        id: impl Into<String>,
        market_id: impl Into<String>,
        order_type: OrderType,
        creation_date: i64,
        price: Decimal,
        quantity: Decimal,
        original_quantity: Option<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            market_id: market_id.into(),
            order_type,
            creation_date,
            price,
            quantity,
            original_quantity,
            total: price * quantity,
        }
    }
}

/// Balances keyed by currency code. A currency missing from a map was not reported by the
/// exchange, which is not the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub available: HashMap<String, Decimal>,
    pub on_hold: HashMap<String, Decimal>,
}

impl BalanceInfo {
    pub fn new(available: HashMap<String, Decimal>, on_hold: HashMap<String, Decimal>) -> Self {
        Self { available, on_hold }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_are_exact() {
        let order = MarketOrder::new(OrderType::Buy, dec!(657.999), dec!(0.123456789));
        assert_eq!(order.total, dec!(81.234443705211));

        let open = OpenOrder::new(
            "O1",
            "XXBTZUSD",
            OrderType::Sell,
            0,
            dec!(0.1),
            dec!(0.2),
            None,
        );
        assert_eq!(open.total, dec!(0.02));
    }

    #[test]
    fn test_order_type_wire_forms() {
        assert_eq!(OrderType::Buy.as_lowercase(), "buy");
        assert_eq!(OrderType::Sell.as_uppercase(), "SELL");
        assert_eq!(OrderType::Sell.to_string(), "SELL");
        assert_eq!("Buy".parse::<OrderType>().unwrap(), OrderType::Buy);
        assert_eq!("SELL".parse::<OrderType>().unwrap(), OrderType::Sell);
        assert!("hold".parse::<OrderType>().is_err());
    }
}
