use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Every Kraken response: `{"error": [...], "result": {...}}`.
#[derive(Debug, Deserialize)]
pub struct KrakenResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenOrderBook {
    /// `[price, volume, timestamp]`
    pub asks: Vec<Vec<Value>>,
    pub bids: Vec<Vec<Value>>,
}

/// Ticker arrays hold `[today, last 24 hours]` unless noted.
#[derive(Debug, Deserialize)]
pub struct KrakenTicker {
    /// Ask `[price, whole lot volume, lot volume]`
    pub a: Vec<Decimal>,
    /// Bid `[price, whole lot volume, lot volume]`
    pub b: Vec<Decimal>,
    /// Last trade closed `[price, lot volume]`
    pub c: Vec<Decimal>,
    pub v: Vec<Decimal>,
    #[serde(default)]
    pub p: Option<Vec<Decimal>>,
    pub l: Vec<Decimal>,
    pub h: Vec<Decimal>,
    /// Today's opening price
    #[serde(default)]
    pub o: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenAssetPair {
    pub altname: String,
}

#[derive(Debug, Deserialize)]
pub struct KrakenOpenOrders {
    pub open: HashMap<String, KrakenOrder>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenOrder {
    /// Seconds since the epoch, fractional.
    pub opentm: Decimal,
    pub descr: KrakenOrderDescription,
    pub vol: Decimal,
    pub vol_exec: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct KrakenOrderDescription {
    /// Pair altname, e.g. `XBTUSD`.
    pub pair: String,
    #[serde(rename = "type")]
    pub side: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct KrakenAddOrderResult {
    pub txid: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenCancelResult {
    pub count: u32,
}
