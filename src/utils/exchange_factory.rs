use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::exchanges::{
    binance::BinanceConnector, bitfinex::BitfinexConnector, bitstamp::BitstampConnector,
    coinbase_pro::CoinbaseProConnector, gemini::GeminiConnector, itbit::ItbitConnector,
    kraken::KrakenConnector, okcoin::OkcoinConnector,
};
use std::str::FromStr;
use std::sync::Arc;

/// Supported exchange types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeType {
    Binance,
    Bitfinex,
    Bitstamp,
    CoinbasePro,
    Gemini,
    Itbit,
    Kraken,
    Okcoin,
}

impl ExchangeType {
    pub const ALL: [Self; 8] = [
        Self::Binance,
        Self::Bitfinex,
        Self::Bitstamp,
        Self::CoinbasePro,
        Self::Gemini,
        Self::Itbit,
        Self::Kraken,
        Self::Okcoin,
    ];
}

impl std::fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binance => write!(f, "Binance"),
            Self::Bitfinex => write!(f, "Bitfinex"),
            Self::Bitstamp => write!(f, "Bitstamp"),
            Self::CoinbasePro => write!(f, "Coinbase Pro"),
            Self::Gemini => write!(f, "Gemini"),
            Self::Itbit => write!(f, "itBit"),
            Self::Kraken => write!(f, "Kraken"),
            Self::Okcoin => write!(f, "OKCoin"),
        }
    }
}

impl FromStr for ExchangeType {
    type Err = ExchangeError;

    /// Case-insensitive; spaces, dashes and underscores are ignored, so `"Coinbase Pro"`,
    /// `"coinbase-pro"` and `"coinbase_pro"` all name the same exchange.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "binance" => Ok(Self::Binance),
            "bitfinex" => Ok(Self::Bitfinex),
            "bitstamp" => Ok(Self::Bitstamp),
            "coinbasepro" | "gdax" => Ok(Self::CoinbasePro),
            "gemini" => Ok(Self::Gemini),
            "itbit" => Ok(Self::Itbit),
            "kraken" => Ok(Self::Kraken),
            "okcoin" => Ok(Self::Okcoin),
            _ => Err(ExchangeError::InvalidParameters(format!(
                "Unknown exchange: {}",
                s
            ))),
        }
    }
}

/// Factory for creating exchange adapters
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create an adapter talking to the live exchange.
    pub fn create_adapter(
        exchange_type: ExchangeType,
        config: &ExchangeConfig,
    ) -> Result<Box<dyn TradingApi>, ExchangeError> {
        Ok(match exchange_type {
            ExchangeType::Binance => Box::new(BinanceConnector::init(config)?),
            ExchangeType::Bitfinex => Box::new(BitfinexConnector::init(config)?),
            ExchangeType::Bitstamp => Box::new(BitstampConnector::init(config)?),
            ExchangeType::CoinbasePro => Box::new(CoinbaseProConnector::init(config)?),
            ExchangeType::Gemini => Box::new(GeminiConnector::init(config)?),
            ExchangeType::Itbit => Box::new(ItbitConnector::init(config)?),
            ExchangeType::Kraken => Box::new(KrakenConnector::init(config)?),
            ExchangeType::Okcoin => Box::new(OkcoinConnector::init(config)?),
        })
    }

    /// Create an adapter sending through the given transport, e.g. a `ReplayTransport`.
    pub fn create_adapter_with_transport(
        exchange_type: ExchangeType,
        config: &ExchangeConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Box<dyn TradingApi>, ExchangeError> {
        Ok(match exchange_type {
            ExchangeType::Binance => {
                Box::new(BinanceConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::Bitfinex => {
                Box::new(BitfinexConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::Bitstamp => {
                Box::new(BitstampConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::CoinbasePro => {
                Box::new(CoinbaseProConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::Gemini => {
                Box::new(GeminiConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::Itbit => {
                Box::new(ItbitConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::Kraken => {
                Box::new(KrakenConnector::init_with_transport(config, transport)?)
            }
            ExchangeType::Okcoin => {
                Box::new(OkcoinConnector::init_with_transport(config, transport)?)
            }
        })
    }
}
