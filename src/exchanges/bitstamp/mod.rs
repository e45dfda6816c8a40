pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::BitstampConnector;
pub use signer::BitstampSigner;

pub const EXCHANGE_NAME: &str = "Bitstamp";
pub const DEFAULT_BASE_URL: &str = "https://www.bitstamp.net";
