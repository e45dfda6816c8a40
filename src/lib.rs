pub mod core;
pub mod exchanges;
pub mod utils;

pub use core::{
    config::{AuthenticationConfig, ExchangeConfig, NetworkConfig, OtherConfig},
    errors::{ErrorKind, ExchangeError},
    traits::TradingApi,
    types::*,
};
pub use exchanges::binance::BinanceConnector;
pub use exchanges::bitfinex::BitfinexConnector;
pub use exchanges::bitstamp::BitstampConnector;
pub use exchanges::coinbase_pro::CoinbaseProConnector;
pub use exchanges::gemini::GeminiConnector;
pub use exchanges::itbit::ItbitConnector;
pub use exchanges::kraken::KrakenConnector;
pub use exchanges::okcoin::OkcoinConnector;
pub use utils::exchange_factory::{ExchangeFactory, ExchangeType};
