use crate::core::kernel::codec::decimal_from_value;
use crate::core::types::OrderType;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct BitstampOrderBook {
    /// `[price, amount]`
    pub bids: Vec<Vec<Value>>,
    pub asks: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct BitstampTicker {
    pub last: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    #[serde(default)]
    pub open: Option<Decimal>,
    pub volume: Decimal,
    #[serde(default)]
    pub vwap: Option<Decimal>,
    /// Seconds since the epoch.
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct BitstampOrder {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC.
    pub datetime: String,
    #[serde(rename = "type", deserialize_with = "order_side")]
    pub side: OrderType,
    pub price: Decimal,
    pub amount: Decimal,
}

/// Response of the buy and sell calls.
#[derive(Debug, Deserialize)]
pub struct BitstampOrderResult {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// Ids arrive as numbers on some endpoints and strings on others.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected order id: {}",
            other
        ))),
    }
}

/// `0` is buy, `1` is sell, as a number or a string.
fn order_side<'de, D>(deserializer: D) -> Result<OrderType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    match decimal_from_value("type", &raw) {
        Ok(side) if side == Decimal::ZERO => Ok(OrderType::Buy),
        Ok(side) if side == Decimal::ONE => Ok(OrderType::Sell),
        _ => Err(serde::de::Error::custom(format!(
            "unexpected order type: {}",
            raw
        ))),
    }
}
