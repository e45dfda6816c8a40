pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::BitfinexConnector;
pub use signer::BitfinexSigner;

pub const EXCHANGE_NAME: &str = "Bitfinex";
pub const DEFAULT_BASE_URL: &str = "https://api.bitfinex.com";
