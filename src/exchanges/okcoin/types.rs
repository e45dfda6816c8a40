use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OKCoin v5 response wrapper. `data` is kept untyped until `code` has been checked.
#[derive(Debug, Deserialize)]
pub struct OkcoinResponse {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct OkcoinOrderBook {
    /// `[price, size, deprecated, order count]`
    pub asks: Vec<Vec<Value>>,
    pub bids: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OkcoinTicker {
    pub last: Decimal,
    pub bid_px: Decimal,
    pub ask_px: Decimal,
    pub open_24h: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,
    /// Base currency volume.
    pub vol_24h: Decimal,
    pub ts: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkcoinOrderRequest {
    pub inst_id: String,
    /// Always `cash` for spot.
    pub td_mode: String,
    pub side: String,
    pub ord_type: String,
    pub px: String,
    pub sz: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkcoinCancelRequest {
    pub inst_id: String,
    pub ord_id: String,
}

/// Per-order result of place and cancel calls.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OkcoinOrderResult {
    pub ord_id: String,
    pub s_code: String,
    #[serde(default)]
    pub s_msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OkcoinOrder {
    pub ord_id: String,
    pub inst_id: String,
    pub px: Decimal,
    /// Original size.
    pub sz: Decimal,
    pub acc_fill_sz: Decimal,
    pub side: String,
    pub c_time: String,
}

#[derive(Debug, Deserialize)]
pub struct OkcoinAccountBalance {
    pub details: Vec<OkcoinBalanceDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OkcoinBalanceDetail {
    pub ccy: String,
    pub avail_bal: Decimal,
    pub frozen_bal: Decimal,
}

/// Fee rates are negative for charges, positive for rebates.
#[derive(Debug, Deserialize)]
pub struct OkcoinTradeFee {
    pub taker: Decimal,
}
