pub mod binance;
pub mod bitfinex;
pub mod bitstamp;
pub mod coinbase_pro;
pub mod gemini;
pub mod itbit;
pub mod kraken;
pub mod okcoin;
