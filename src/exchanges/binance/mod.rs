pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::BinanceConnector;
pub use signer::BinanceSigner;

pub const EXCHANGE_NAME: &str = "Binance";
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
