use crate::core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType, Ticker},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Canonical trading contract every exchange adapter implements.
///
/// Every method either returns a fully populated canonical value or fails with an
/// [`ExchangeError`] whose [`kind`](ExchangeError::kind) tells the caller whether a retry is
/// safe. Nothing here retries on its own: `create_order` and `cancel_order` are financial
/// actions and only the caller knows whether repeating one is acceptable.
#[async_trait]
pub trait TradingApi: Send + Sync {
    /// Validate the configuration and build a ready adapter. Fails before any network call
    /// when a required item is missing or invalid.
    fn init(config: &ExchangeConfig) -> Result<Self, ExchangeError>
    where
        Self: Sized;

    fn impl_name(&self) -> &str;

    async fn get_market_orders(&self, market_id: &str) -> Result<MarketOrderBook, ExchangeError>;

    async fn get_your_open_orders(&self, market_id: &str) -> Result<Vec<OpenOrder>, ExchangeError>;

    /// Place a limit order and return the exchange's order id.
    async fn create_order(
        &self,
        market_id: &str,
        order_type: OrderType,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError>;

    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError>;

    async fn get_latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError>;

    async fn get_balance_info(&self) -> Result<BalanceInfo, ExchangeError>;

    async fn get_ticker(&self, market_id: &str) -> Result<Ticker, ExchangeError>;

    /// Fraction of a buy order taken as fee, e.g. `0.0025` for 0.25 %.
    async fn get_percentage_of_buy_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError>;

    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> Result<Decimal, ExchangeError>;
}
