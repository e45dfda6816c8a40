use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct GeminiOrderBook {
    pub bids: Vec<GeminiBookEntry>,
    pub asks: Vec<GeminiBookEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiBookEntry {
    pub price: Decimal,
    pub amount: Decimal,
}

/// `/v1/pubticker/{symbol}`
#[derive(Debug, Deserialize)]
pub struct GeminiPubTicker {
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
    /// Keyed by currency code, plus `timestamp` in epoch milliseconds.
    pub volume: HashMap<String, Value>,
}

/// `/v2/ticker/{symbol}`
#[derive(Debug, Deserialize)]
pub struct GeminiTickerV2 {
    #[serde(default)]
    pub open: Option<Decimal>,
    pub high: Decimal,
    pub low: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct GeminiOrder {
    pub order_id: String,
    pub symbol: String,
    pub side: String,
    pub price: Decimal,
    pub original_amount: Decimal,
    pub remaining_amount: Decimal,
    pub timestampms: i64,
}

#[derive(Debug, Deserialize)]
pub struct GeminiBalance {
    pub currency: String,
    pub amount: Decimal,
    pub available: Decimal,
}
