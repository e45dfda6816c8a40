use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CoinbaseOrderBook {
    /// `[price, size, num-orders]`
    pub bids: Vec<Vec<Value>>,
    pub asks: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct CoinbaseTicker {
    /// Last trade price.
    pub price: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub time: String,
}

/// 24 hour statistics.
#[derive(Debug, Deserialize)]
pub struct CoinbaseStats {
    #[serde(default)]
    pub open: Option<Decimal>,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CoinbaseOrderRequest {
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
    pub product_id: String,
    pub price: String,
    pub size: String,
}

#[derive(Debug, Deserialize)]
pub struct CoinbaseOrder {
    pub id: String,
    pub product_id: String,
    pub side: String,
    pub price: Decimal,
    pub size: Decimal,
    #[serde(default)]
    pub filled_size: Decimal,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CoinbaseOrderResult {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CoinbaseAccount {
    pub currency: String,
    pub available: Decimal,
    pub hold: Decimal,
}
