use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::core::types::OrderType;
use crate::exchanges::bitstamp::types::{
    BitstampOrder, BitstampOrderBook, BitstampOrderResult, BitstampTicker,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Bitstamp v2 REST API client
#[derive(Debug)]
pub struct BitstampRest {
    client: RestClient,
}

impl BitstampRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Bitstamp reports business errors with a 200 status, either as `{"error": ...}` or as
    /// `{"status": "error", "reason": ...}`.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let value: Value = decode_json(exchange, response)?;

        if let Some(object) = value.as_object() {
            if let Some(error) = object.get("error") {
                return Err(ExchangeError::exchange_reported(exchange, error));
            }
            if object.get("status").and_then(Value::as_str) == Some("error") {
                let reason = object.get("reason").cloned().unwrap_or(Value::Null);
                return Err(ExchangeError::exchange_reported(exchange, reason));
            }
        }

        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} response: {}",
                exchange, e
            ))
        })
    }

    pub async fn get_order_book(&self, market: &str) -> Result<BitstampOrderBook, ExchangeError> {
        let request = SignableRequest::get(format!("/api/v2/order_book/{}/", market));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_ticker(&self, market: &str) -> Result<BitstampTicker, ExchangeError> {
        let request = SignableRequest::get(format!("/api/v2/ticker/{}/", market));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_open_orders(&self, market: &str) -> Result<Vec<BitstampOrder>, ExchangeError> {
        let request = SignableRequest::post(format!("/api/v2/open_orders/{}/", market));
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn place_limit_order(
        &self,
        market: &str,
        order_type: OrderType,
        amount: String,
        price: String,
    ) -> Result<BitstampOrderResult, ExchangeError> {
        let request = SignableRequest::post(format!(
            "/api/v2/{}/{}/",
            order_type.as_lowercase(),
            market
        ))
        .with_form(vec![
            ("amount".to_string(), amount),
            ("price".to_string(), price),
        ]);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let request = SignableRequest::post("/api/v2/cancel_order/")
            .with_form(vec![("id".to_string(), order_id.to_string())]);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    /// Flat map of `{currency}_available`, `{currency}_reserved`, `{market}_fee`, ...
    pub async fn get_balance(&self) -> Result<Map<String, Value>, ExchangeError> {
        let response = self
            .client
            .private(SignableRequest::post("/api/v2/balance/"))
            .await?;
        self.handle_response(&response)
    }
}
