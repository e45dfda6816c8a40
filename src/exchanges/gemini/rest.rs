use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::gemini::types::{
    GeminiBalance, GeminiOrder, GeminiOrderBook, GeminiPubTicker, GeminiTickerV2,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Gemini REST API client
#[derive(Debug)]
pub struct GeminiRest {
    client: RestClient,
}

impl GeminiRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Gemini errors look like `{"result": "error", "reason": ..., "message": ...}`.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let value: Value = decode_json(exchange, response)?;

        if value.get("result").and_then(Value::as_str) == Some("error") {
            let reason = value.get("reason").and_then(Value::as_str).unwrap_or("");
            let message = value.get("message").and_then(Value::as_str).unwrap_or("");
            return Err(ExchangeError::exchange_reported(
                exchange,
                format!("{}: {}", reason, message),
            ));
        }

        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} response: {}",
                exchange, e
            ))
        })
    }

    pub async fn get_order_book(&self, symbol: &str) -> Result<GeminiOrderBook, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/book/{}", symbol))
            .with_query("limit_bids", "0")
            .with_query("limit_asks", "0");
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_pub_ticker(&self, symbol: &str) -> Result<GeminiPubTicker, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/pubticker/{}", symbol));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_ticker_v2(&self, symbol: &str) -> Result<GeminiTickerV2, ExchangeError> {
        let request = SignableRequest::get(format!("/v2/ticker/{}", symbol));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_active_orders(&self) -> Result<Vec<GeminiOrder>, ExchangeError> {
        let response = self.client.private(SignableRequest::post("/v1/orders")).await?;
        self.handle_response(&response)
    }

    pub async fn new_order(
        &self,
        symbol: &str,
        side: &str,
        amount: String,
        price: String,
    ) -> Result<GeminiOrder, ExchangeError> {
        let request = SignableRequest::post("/v1/order/new").with_json(json!({
            "symbol": symbol,
            "amount": amount,
            "price": price,
            "side": side,
            "type": "exchange limit",
        }));
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let id: u64 = order_id.parse().map_err(|_| {
            ExchangeError::InvalidParameters(format!(
                "Gemini order ids are numeric: {}",
                order_id
            ))
        })?;
        let request =
            SignableRequest::post("/v1/order/cancel").with_json(json!({ "order_id": id }));
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_balances(&self) -> Result<Vec<GeminiBalance>, ExchangeError> {
        let response = self.client.private(SignableRequest::post("/v1/balances")).await?;
        self.handle_response(&response)
    }
}
