use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::bitfinex::{
    conversions, rest::BitfinexRest, BitfinexSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

const FORMATS: OrderFormats = OrderFormats::new(8, 8);

/// Bitfinex adapter (v1 API). Market ids are lowercase symbols such as `btcusd`.
#[derive(Debug)]
pub struct BitfinexConnector {
    rest: BitfinexRest,
    use_global_trading_fee: bool,
}

impl BitfinexConnector {
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
        let signer = BitfinexSigner::new(auth.require("key")?, auth.require("secret")?);
        let use_global_trading_fee = config.other.require_bool("use-global-trading-fee")?;

        let mut builder = RestClientBuilder::new(RestClientConfig::new(
            config.base_url_or(DEFAULT_BASE_URL),
            EXCHANGE_NAME,
        ))
        .with_network(config.network.clone())
        .with_signer(Arc::new(signer))
        .with_nonce(NonceGenerator::epoch_micros());
        if let Some(transport) = transport {
            builder = builder.with_transport(transport);
        }

        Ok(Self {
            rest: BitfinexRest::new(builder.build()?),
            use_global_trading_fee,
        })
    }

    async fn taker_fee(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        let info = self.rest.get_account_info().await?;
        conversions::taker_fee(&info, market_id, self.use_global_trading_fee)
    }
}

#[async_trait]
impl TradingApi for BitfinexConnector {
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

    /// Active orders span all symbols and are filtered locally.
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
        let result = self
            .rest
            .new_order(
                market_id,
                order_type.as_lowercase(),
                FORMATS.quantity.format(quantity),
                FORMATS.price.format(price),
            )
            .await?;
        Ok(result.order_id.to_string())
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        self.rest.cancel_order(order_id).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.rest.get_ticker(market_id).await?.last_price)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let balances = self.rest.get_balances().await?;
        Ok(conversions::convert_balances(&balances))
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
