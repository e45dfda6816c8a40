use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::itbit::types::{
    ItbitOrder, ItbitOrderBook, ItbitOrderRequest, ItbitTicker, ItbitWallet,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// itBit REST API client
#[derive(Debug)]
pub struct ItbitRest {
    client: RestClient,
}

impl ItbitRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Error bodies carry `code` and `description`.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let value: Value = decode_json(exchange, response)?;

        if let Some(description) = value.get("description").and_then(Value::as_str) {
            if value.get("code").is_some() {
                return Err(ExchangeError::exchange_reported(exchange, description));
            }
        }

        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} response: {}",
                exchange, e
            ))
        })
    }

    pub async fn get_order_book(&self, instrument: &str) -> Result<ItbitOrderBook, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/markets/{}/order_book", instrument));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_ticker(&self, instrument: &str) -> Result<ItbitTicker, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/markets/{}/ticker", instrument));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_wallets(&self, user_id: &str) -> Result<Vec<ItbitWallet>, ExchangeError> {
        let request = SignableRequest::get("/v1/wallets").with_query("userId", user_id);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_open_orders(
        &self,
        wallet_id: &str,
        instrument: &str,
    ) -> Result<Vec<ItbitOrder>, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/wallets/{}/orders", wallet_id))
            .with_query("instrument", instrument)
            .with_query("status", "open");
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn place_order(
        &self,
        wallet_id: &str,
        order: &ItbitOrderRequest,
    ) -> Result<ItbitOrder, ExchangeError> {
        let request = SignableRequest::post(format!("/v1/wallets/{}/orders", wallet_id))
            .with_json(serde_json::to_value(order)?);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    /// Accepted cancellations answer 202 with an empty body.
    pub async fn cancel_order(&self, wallet_id: &str, order_id: &str) -> Result<(), ExchangeError> {
        let request =
            SignableRequest::delete(format!("/v1/wallets/{}/orders/{}", wallet_id, order_id));
        self.client.private(request).await?;
        Ok(())
    }
}
