mod common;

use common::{config, fixture, replay};
use rust_decimal_macros::dec;
use tradebridge::{ExchangeError, ExchangeFactory, ExchangeType, TradingApi};

fn config_for(exchange: ExchangeType) -> tradebridge::ExchangeConfig {
    let fees = [("buy-fee", "0.25"), ("sell-fee", "0.25")];
    match exchange {
        ExchangeType::Binance => config("Binance", &[("key", "k"), ("secret", "s")], &[]),
        ExchangeType::Bitfinex => config(
            "Bitfinex",
            &[("key", "k"), ("secret", "s")],
            &[("use-global-trading-fee", "true")],
        ),
        ExchangeType::Bitstamp => config(
            "Bitstamp",
            &[("client-id", "c"), ("key", "k"), ("secret", "s")],
            &[],
        ),
        ExchangeType::CoinbasePro => config(
            "Coinbase Pro",
            &[("key", "k"), ("secret", "c2VjcmV0"), ("passphrase", "p")],
            &fees,
        ),
        ExchangeType::Gemini => config("Gemini", &[("key", "k"), ("secret", "s")], &fees),
        ExchangeType::Itbit => config(
            "itBit",
            &[("key", "k"), ("secret", "s"), ("userId", "u")],
            &fees,
        ),
        ExchangeType::Kraken => config("Kraken", &[("key", "k"), ("secret", "c2VjcmV0")], &fees),
        ExchangeType::Okcoin => config(
            "OKCoin",
            &[("key", "k"), ("secret", "s"), ("passphrase", "p")],
            &[],
        ),
    }
}

#[test]
fn test_every_exchange_can_be_created_by_name() {
    for exchange in ExchangeType::ALL {
        let parsed: ExchangeType = exchange.to_string().parse().unwrap();
        let adapter = ExchangeFactory::create_adapter(parsed, &config_for(exchange)).unwrap();
        assert_eq!(adapter.impl_name(), exchange.to_string());
    }
}

#[test]
fn test_empty_configuration_is_rejected_for_every_exchange() {
    let empty = config("empty", &[], &[]);
    for exchange in ExchangeType::ALL {
        let result = ExchangeFactory::create_adapter(exchange, &empty);
        assert!(
            matches!(result, Err(ExchangeError::ConfigError(_))),
            "{} accepted an empty configuration",
            exchange
        );
    }
}

#[test]
fn test_unknown_exchange_name() {
    assert!(matches!(
        "bitmex".parse::<ExchangeType>(),
        Err(ExchangeError::InvalidParameters(_))
    ));
}

#[tokio::test]
async fn test_adapters_are_usable_as_trait_objects() {
    let transport = replay();
    transport.push_ok(fixture("kraken", "ticker.json")).await;
    let adapter = ExchangeFactory::create_adapter_with_transport(
        "kraken".parse().unwrap(),
        &config_for(ExchangeType::Kraken),
        transport.clone(),
    )
    .unwrap();

    let price = adapter.get_latest_market_price("XXBTZUSD").await.unwrap();
    assert_eq!(price, dec!(657.999));
}
