use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ItbitOrderBook {
    /// `[price, quantity]`
    pub bids: Vec<Vec<Value>>,
    pub asks: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItbitTicker {
    pub bid: Decimal,
    pub ask: Decimal,
    pub last_price: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,
    #[serde(default)]
    pub open_today: Option<Decimal>,
    pub volume_24h: Decimal,
    #[serde(default)]
    pub vwap_24h: Option<Decimal>,
    #[serde(rename = "serverTimeUTC")]
    pub server_time_utc: String,
}

#[derive(Debug, Deserialize)]
pub struct ItbitWallet {
    pub id: String,
    pub balances: Vec<ItbitWalletBalance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItbitWalletBalance {
    pub currency: String,
    pub available_balance: Decimal,
    pub total_balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ItbitOrderRequest {
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    /// Base currency of the instrument.
    pub currency: String,
    pub amount: String,
    pub price: String,
    pub instrument: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItbitOrder {
    pub id: String,
    pub instrument: String,
    pub side: String,
    pub amount: Decimal,
    pub amount_filled: Decimal,
    pub price: Decimal,
    pub created_time: String,
}
