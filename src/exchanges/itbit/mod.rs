pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::ItbitConnector;
pub use signer::ItbitSigner;

pub const EXCHANGE_NAME: &str = "itBit";
pub const DEFAULT_BASE_URL: &str = "https://api.itbit.com";
