use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::bitstamp::{
    conversions, rest::BitstampRest, BitstampSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

const FORMATS: OrderFormats = OrderFormats::new(2, 8);

/// Bitstamp adapter (v2 API). Market ids are lowercase pairs such as `btcusd`.
#[derive(Debug)]
pub struct BitstampConnector {
    rest: BitstampRest,
}

impl BitstampConnector {
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
        let signer = BitstampSigner::new(
            auth.require("client-id")?,
            auth.require("key")?,
            auth.require("secret")?,
        );

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
            rest: BitstampRest::new(builder.build()?),
        })
    }

    /// Bitstamp charges the same rate on both sides.
    async fn market_fee(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        let balance = self.rest.get_balance().await?;
        conversions::market_fee(&balance, market_id)
    }
}

#[async_trait]
impl TradingApi for BitstampConnector {
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
            .map(|order| conversions::convert_open_order(market_id, order))
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
        let result = self
            .rest
            .place_limit_order(
                market_id,
                order_type,
                FORMATS.quantity.format(quantity),
                FORMATS.price.format(price),
            )
            .await?;
        Ok(result.id)
    }

    /// An unknown order comes back as an error envelope and surfaces as a fatal error.
    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        self.rest.cancel_order(order_id).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.rest.get_ticker(market_id).await?.last)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let balance = self.rest.get_balance().await?;
        conversions::convert_balances(&balance)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_ticker(&self, market_id: &str) -> Result<Ticker, ExchangeError> {
        let ticker = self.rest.get_ticker(market_id).await?;
        conversions::convert_ticker(&ticker)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_percentage_of_buy_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        self.market_fee(market_id).await
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        self.market_fee(market_id).await
    }
}
