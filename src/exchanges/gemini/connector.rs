use crate::core::config::{ExchangeConfig, StaticFees};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::gemini::{
    conversions, rest::GeminiRest, GeminiSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

const FORMATS: OrderFormats = OrderFormats::new(2, 6);

/// Gemini adapter. Market ids are lowercase symbols such as `btcusd`.
#[derive(Debug)]
pub struct GeminiConnector {
    rest: GeminiRest,
    fees: StaticFees,
}

impl GeminiConnector {
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
        let signer = GeminiSigner::new(auth.require("key")?, auth.require("secret")?);
        let fees = StaticFees::from_other_config(&config.other)?;

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
            rest: GeminiRest::new(builder.build()?),
            fees,
        })
    }
}

#[async_trait]
impl TradingApi for GeminiConnector {
    fn init(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        Self::build(config, None)
    }

    fn impl_name(&self) -> &str {
        EXCHANGE_NAME
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_market_orders(&self, market_id: &str) -> Result<MarketOrderBook, ExchangeError> {
        let book = self.rest.get_order_book(market_id).await?;
        Ok(conversions::convert_order_book(market_id, &book))
    }

    /// Gemini lists active orders across all symbols.
    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_your_open_orders(&self, market_id: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        self.rest
            .get_active_orders()
            .await?
            .iter()
            .filter(|order| order.symbol.eq_ignore_ascii_case(market_id))
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
        let order = self
            .rest
            .new_order(
                market_id,
                order_type.as_lowercase(),
                FORMATS.quantity.format(quantity),
                FORMATS.price.format(price),
            )
            .await?;
        Ok(order.order_id)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        self.rest.cancel_order(order_id).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.rest.get_pub_ticker(market_id).await?.last)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let balances = self.rest.get_balances().await?;
        Ok(conversions::convert_balances(&balances))
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_ticker(&self, market_id: &str) -> Result<Ticker, ExchangeError> {
        let ticker = self.rest.get_pub_ticker(market_id).await?;
        let ticker_v2 = self.rest.get_ticker_v2(market_id).await?;
        conversions::convert_ticker(market_id, &ticker, &ticker_v2)
    }

    async fn get_percentage_of_buy_order_taken_for_exchange_fee(
        &self,
        _market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        Ok(self.fees.buy)
    }

    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        _market_id: &str,
    ) -> Result<Decimal, ExchangeError> {
        Ok(self.fees.sell)
    }
}
