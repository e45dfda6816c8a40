pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::KrakenConnector;
pub use signer::KrakenSigner;

pub const EXCHANGE_NAME: &str = "Kraken";
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";
