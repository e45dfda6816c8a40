use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::binance::{
    conversions, rest::BinanceRest, BinanceSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

const FORMATS: OrderFormats = OrderFormats::new(2, 6);

/// Binance spot adapter. Market ids are symbols such as `BTCUSDT`.
#[derive(Debug)]
pub struct BinanceConnector {
    rest: BinanceRest,
}

impl BinanceConnector {
    pub fn init_with_transport(
        config: &ExchangeConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ExchangeError> {
        Self::build(config, Some(transport))
    }

    fn build(
        config: &ExchangeConfig,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> Result<Self, ExchangeError> {
        let auth = &config.authentication;
        let signer = BinanceSigner::new(auth.require("key")?, auth.require("secret")?);

        let mut builder = RestClientBuilder::new(RestClientConfig::new(
            config.base_url_or(DEFAULT_BASE_URL),
            EXCHANGE_NAME,
        ))
        .with_network(config.network.clone())
        .with_signer(Arc::new(signer))
        .with_nonce(NonceGenerator::epoch_millis());
        if let Some(transport) = transport {
            builder = builder.with_transport(transport);
        }

        Ok(Self {
            rest: BinanceRest::new(builder.build()?),
        })
    }

    async fn taker_fee(&self) -> Result<Decimal, ExchangeError> {
        let account = self.rest.get_account_info().await?;
        Ok(conversions::taker_fee(&account))
    }
}

#[async_trait]
impl TradingApi for BinanceConnector {
    fn init(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        Self::build(config, None)
    }

    fn impl_name(&self) -> &str {
        EXCHANGE_NAME
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_market_orders(&self, market_id: &str) -> Result<MarketOrderBook, ExchangeError> {
        let book = self.rest.get_order_book(market_id).await?;
        conversions::convert_order_book(market_id, &book)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_your_open_orders(&self, market_id: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        self.rest
            .get_open_orders(market_id)
            .await?
            .iter()
            .map(conversions::convert_open_order)
            .collect()
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn create_order(
        &self,
        market_id: &str,
        order_type: OrderType,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError> {
        let response = self
            .rest
            .place_order(
                market_id,
                order_type.as_uppercase(),
                &FORMATS.quantity.format(quantity),
                &FORMATS.price.format(price),
            )
            .await?;
        Ok(response.order_id.to_string())
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        self.rest.cancel_order(market_id, order_id).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.rest.get_ticker_24h(market_id).await?.last_price)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let account = self.rest.get_account_info().await?;
        Ok(conversions::convert_balances(&account))
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_ticker(&self, market_id: &str) -> Result<Ticker, ExchangeError> {
        let ticker = self.rest.get_ticker_24h(market_id).await?;
        Ok(conversions::convert_ticker(&ticker))
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_percentage_of_buy_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        self.taker_fee().await
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        self.taker_fee().await
    }
}
