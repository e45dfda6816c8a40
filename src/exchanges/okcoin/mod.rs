pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::OkcoinConnector;
pub use signer::OkcoinSigner;

pub const EXCHANGE_NAME: &str = "OKCoin";
pub const DEFAULT_BASE_URL: &str = "https://www.okcoin.com";
