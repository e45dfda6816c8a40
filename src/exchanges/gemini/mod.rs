pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

pub use connector::GeminiConnector;
pub use signer::GeminiSigner;

pub const EXCHANGE_NAME: &str = "Gemini";
pub const DEFAULT_BASE_URL: &str = "https://api.gemini.com";
