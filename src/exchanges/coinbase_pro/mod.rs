pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::CoinbaseProConnector;
pub use signer::CoinbaseProSigner;

pub const EXCHANGE_NAME: &str = "Coinbase Pro";
pub const DEFAULT_BASE_URL: &str = "https://api.pro.coinbase.com";
