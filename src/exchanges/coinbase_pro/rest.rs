use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::coinbase_pro::types::{
    CoinbaseAccount, CoinbaseOrder, CoinbaseOrderBook, CoinbaseOrderRequest, CoinbaseOrderResult,
    CoinbaseStats, CoinbaseTicker,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Coinbase Pro REST API client
#[derive(Debug)]
pub struct CoinbaseProRest {
    client: RestClient,
}

impl CoinbaseProRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Errors normally arrive with a 4xx status. A 2xx body consisting only of `message` is
    /// treated the same way.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let value: Value = decode_json(exchange, response)?;

        if let Some(object) = value.as_object() {
            if object.len() == 1 {
                if let Some(message) = object.get("message") {
                    return Err(ExchangeError::exchange_reported(exchange, message));
                }
            }
        }

        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} response: {}",
                exchange, e
            ))
        })
    }

    pub async fn get_order_book(&self, product: &str) -> Result<CoinbaseOrderBook, ExchangeError> {
        let request =
            SignableRequest::get(format!("/products/{}/book", product)).with_query("level", "2");
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_ticker(&self, product: &str) -> Result<CoinbaseTicker, ExchangeError> {
        let request = SignableRequest::get(format!("/products/{}/ticker", product));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_stats(&self, product: &str) -> Result<CoinbaseStats, ExchangeError> {
        let request = SignableRequest::get(format!("/products/{}/stats", product));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_open_orders(&self, product: &str) -> Result<Vec<CoinbaseOrder>, ExchangeError> {
        let request = SignableRequest::get("/orders")
            .with_query("status", "open")
            .with_query("product_id", product);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn place_order(
        &self,
        order: &CoinbaseOrderRequest,
    ) -> Result<CoinbaseOrderResult, ExchangeError> {
        let request = SignableRequest::post("/orders").with_json(serde_json::to_value(order)?);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    /// Unknown orders are rejected with a 404 by the exchange.
    pub async fn cancel_order(&self, order_id: &str) -> Result<(), ExchangeError> {
        let request = SignableRequest::delete(format!("/orders/{}", order_id));
        self.client.private(request).await?;
        Ok(())
    }

    pub async fn get_accounts(&self) -> Result<Vec<CoinbaseAccount>, ExchangeError> {
        let response = self.client.private(SignableRequest::get("/accounts")).await?;
        self.handle_response(&response)
    }
}
