use crate::core::config::{ExchangeConfig, StaticFees};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::itbit::types::{ItbitOrderRequest, ItbitWallet};
use crate::exchanges::itbit::{
    conversions, rest::ItbitRest, ItbitSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

const FORMATS: OrderFormats = OrderFormats::new(2, 4);

/// itBit adapter. Market ids are instruments such as `XBTUSD`.
///
/// Trading calls are scoped to a wallet; the id of the user's first wallet is looked up on
/// first use and kept for the lifetime of the adapter.
#[derive(Debug)]
pub struct ItbitConnector {
    rest: ItbitRest,
    user_id: String,
    fees: StaticFees,
    wallet_id: OnceCell<String>,
}

impl ItbitConnector {
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
        let user_id = auth.require("userId")?.to_string();
        let base_url = config.base_url_or(DEFAULT_BASE_URL);
        let signer = ItbitSigner::new(auth.require("key")?, auth.require("secret")?, &base_url);
        let fees = StaticFees::from_other_config(&config.other)?;

        let mut builder = RestClientBuilder::new(RestClientConfig::new(base_url, EXCHANGE_NAME))
            .with_network(config.network.clone())
            .with_signer(Arc::new(signer))
            .with_nonce(NonceGenerator::counter(0));
        if let Some(transport) = transport {
            builder = builder.with_transport(transport);
        }

        Ok(Self {
            rest: ItbitRest::new(builder.build()?),
            user_id,
            fees,
            wallet_id: OnceCell::new(),
        })
    }

    async fn first_wallet(&self) -> Result<ItbitWallet, ExchangeError> {
        self.rest
            .get_wallets(&self.user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ExchangeError::exchange_reported(EXCHANGE_NAME, "no wallet found for user")
            })
    }

    async fn wallet_id(&self) -> Result<&str, ExchangeError> {
        let wallet_id = self
            .wallet_id
            .get_or_try_init(|| async {
                let wallet = self.first_wallet().await?;
                debug!(wallet_id = %wallet.id, "resolved wallet");
                Ok::<_, ExchangeError>(wallet.id)
            })
            .await?;
        Ok(wallet_id.as_str())
    }
}

#[async_trait]
impl TradingApi for ItbitConnector {
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
        let wallet_id = self.wallet_id().await?;
        self.rest
            .get_open_orders(wallet_id, market_id)
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
        let wallet_id = self.wallet_id().await?;
        let order = ItbitOrderRequest {
            side: order_type.as_lowercase().to_string(),
            order_type: "limit".to_string(),
            currency: market_id.get(..3).unwrap_or(market_id).to_string(),
            amount: FORMATS.quantity.format(quantity),
            price: FORMATS.price.format(price),
            instrument: market_id.to_string(),
        };
        Ok(self.rest.place_order(wallet_id, &order).await?.id)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        let wallet_id = self.wallet_id().await?;
        self.rest.cancel_order(wallet_id, order_id).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.rest.get_ticker(market_id).await?.last_price)
    }

    /// Balances of the trading wallet. The wallet listing doubles as the wallet lookup.
    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let wallets = self.rest.get_wallets(&self.user_id).await?;
        let wallet = match self.wallet_id.get() {
            Some(wallet_id) => wallets.iter().find(|wallet| &wallet.id == wallet_id),
            None => wallets.first(),
        }
        .ok_or_else(|| {
            ExchangeError::exchange_reported(EXCHANGE_NAME, "trading wallet not found")
        })?;

        if self.wallet_id.get().is_none() && self.wallet_id.set(wallet.id.clone()).is_err() {
            // A concurrent lookup won; both saw the same first wallet.
            debug!(wallet = %wallet.id, "wallet id already cached");
        }
        Ok(conversions::convert_balances(wallet))
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_ticker(&self, market_id: &str) -> Result<Ticker, ExchangeError> {
        let ticker = self.rest.get_ticker(market_id).await?;
        conversions::convert_ticker(&ticker)
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
