use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::okcoin::types::{OkcoinCancelRequest, OkcoinOrderRequest};
use crate::exchanges::okcoin::{
    conversions, rest::OkcoinRest, OkcoinSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

const FORMATS: OrderFormats = OrderFormats::new(2, 8);

/// OKCoin spot adapter (v5 API). Market ids are instrument ids such as `BTC-USD`.
#[derive(Debug)]
pub struct OkcoinConnector {
    rest: OkcoinRest,
}

impl OkcoinConnector {
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
        let signer = OkcoinSigner::new(
            auth.require("key")?,
            auth.require("secret")?,
            auth.require("passphrase")?,
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
            rest: OkcoinRest::new(builder.build()?),
        })
    }

    async fn taker_fee(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        let fee = self.rest.get_trade_fee(market_id).await?;
        Ok(fee.taker.abs())
    }
}

#[async_trait]
impl TradingApi for OkcoinConnector {
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
            .get_pending_orders(market_id)
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
        let order = OkcoinOrderRequest {
            inst_id: market_id.to_string(),
            td_mode: "cash".to_string(),
            side: order_type.as_lowercase().to_string(),
            ord_type: "limit".to_string(),
            px: FORMATS.price.format(price),
            sz: FORMATS.quantity.format(quantity),
        };
        Ok(self.rest.place_order(&order).await?.ord_id)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        let cancel = OkcoinCancelRequest {
            inst_id: market_id.to_string(),
            ord_id: order_id.to_string(),
        };
        let result = self.rest.cancel_order(&cancel).await?;
        Ok(result.s_code == "0")
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.rest.get_ticker(market_id).await?.last)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let balance = self.rest.get_balance().await?;
        Ok(conversions::convert_balances(&balance))
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
        self.taker_fee(market_id).await
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        self.taker_fee(market_id).await
    }
}
