use crate::core::config::{ExchangeConfig, StaticFees};
use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::OrderFormats;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::rest::{RestClientBuilder, RestClientConfig};
use crate::core::kernel::transport::HttpTransport;
use crate::core::traits::TradingApi;
use crate::core::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker};
use crate::exchanges::kraken::{
    conversions, rest::KrakenRest, KrakenSigner, DEFAULT_BASE_URL, EXCHANGE_NAME,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

const FORMATS: OrderFormats = OrderFormats::new(8, 8);

/// Kraken spot adapter. Market ids are Kraken pair names such as `XXBTZUSD`.
#[derive(Debug)]
pub struct KrakenConnector {
    rest: KrakenRest,
    fees: StaticFees,
    /// Pair name to altname, filled by the first successful AssetPairs call per pair.
    altnames: RwLock<HashMap<String, String>>,
}

impl KrakenConnector {
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
        let signer = KrakenSigner::new(auth.require("key")?, auth.require("secret")?)?;
        let fees = StaticFees::from_other_config(&config.other)?;
        let keep_alive = config
            .other
            .get_bool("keep-alive-during-maintenance")?
            .unwrap_or(false);

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
            rest: KrakenRest::new(builder.build()?, keep_alive),
            fees,
            altnames: RwLock::new(HashMap::new()),
        })
    }

    async fn altname(&self, market_id: &str) -> Result<String, ExchangeError> {
        if let Some(altname) = self.altnames.read().await.get(market_id) {
            return Ok(altname.clone());
        }
        let pair = self.rest.get_asset_pair(market_id).await?;
        debug!(market = market_id, altname = %pair.altname, "cached pair altname");
        self.altnames
            .write()
            .await
            .insert(market_id.to_string(), pair.altname.clone());
        Ok(pair.altname)
    }
}

#[async_trait]
impl TradingApi for KrakenConnector {
    fn init(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        Self::build(config, None)
    }

    fn impl_name(&self) -> &str {
        EXCHANGE_NAME
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_market_orders(&self, market_id: &str) -> Result<MarketOrderBook, ExchangeError> {
        let book = self.rest.get_depth(market_id).await?;
        conversions::convert_order_book(market_id, &book)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_your_open_orders(&self, market_id: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        let altname = self.altname(market_id).await?;
        let orders = self.rest.get_open_orders().await?;
        conversions::convert_open_orders(market_id, &altname, &orders)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn create_order(
        &self,
        market_id: &str,
        order_type: OrderType,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError> {
        let params = vec![
            ("ordertype".to_string(), "limit".to_string()),
            ("pair".to_string(), market_id.to_string()),
            ("price".to_string(), FORMATS.price.format(price)),
            ("type".to_string(), order_type.as_lowercase().to_string()),
            ("volume".to_string(), FORMATS.quantity.format(quantity)),
        ];
        let result = self.rest.add_order(params).await?;
        result.txid.into_iter().next().ok_or_else(|| {
            ExchangeError::DeserializationError(format!(
                "{} accepted the order but returned no txid",
                EXCHANGE_NAME
            ))
        })
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        Ok(self.rest.cancel_order(order_id).await?.count > 0)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME, market = %market_id))]
    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        let ticker = self.rest.get_ticker(market_id).await?;
        Ok(conversions::convert_ticker(&ticker)?.last)
    }

    #[instrument(skip(self), fields(exchange = EXCHANGE_NAME))]
    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let balances = self.rest.get_balance().await?;
        Ok(conversions::convert_balances(balances))
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
