use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Error body, e.g. `{"code": -2011, "msg": "Unknown order sent."}`
#[derive(Debug, Deserialize)]
pub struct BinanceError {
    pub code: i32,
    pub msg: String,
}

#[derive(Debug, Deserialize)]
pub struct BinanceOrderBook {
    /// `[price, quantity]`
    pub bids: Vec<Vec<Value>>,
    pub asks: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceTicker24h {
    pub last_price: Decimal,
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub open_price: Decimal,
    pub volume: Decimal,
    pub weighted_avg_price: Decimal,
    pub close_time: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrder {
    pub order_id: u64,
    pub symbol: String,
    pub price: Decimal,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    pub side: String,
    pub time: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrderResponse {
    pub order_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceAccountInfo {
    /// Basis points of 0.01 %, e.g. `10` for 0.1 %.
    pub taker_commission: Decimal,
    pub balances: Vec<BinanceBalance>,
}

#[derive(Debug, Deserialize)]
pub struct BinanceBalance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}
