use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BitfinexOrderBook {
    pub bids: Vec<BitfinexBookEntry>,
    pub asks: Vec<BitfinexBookEntry>,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexBookEntry {
    pub price: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexTicker {
    pub bid: Decimal,
    pub ask: Decimal,
    pub last_price: Decimal,
    pub low: Decimal,
    pub high: Decimal,
    pub volume: Decimal,
    /// Seconds since the epoch, fractional.
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexOrder {
    pub id: u64,
    pub symbol: String,
    pub side: String,
    pub price: Decimal,
    pub original_amount: Decimal,
    pub remaining_amount: Decimal,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexNewOrderResult {
    pub order_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexBalance {
    /// `exchange`, `trading` or `deposit`.
    #[serde(rename = "type")]
    pub wallet: String,
    pub currency: String,
    pub amount: Decimal,
    pub available: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexAccountInfo {
    /// Percentage.
    pub taker_fees: Decimal,
    #[serde(default)]
    pub fees: Vec<BitfinexPairFee>,
}

#[derive(Debug, Deserialize)]
pub struct BitfinexPairFee {
    /// Base currency code, e.g. `BTC`.
    pub pairs: String,
    /// Percentage.
    pub taker_fees: Decimal,
}
