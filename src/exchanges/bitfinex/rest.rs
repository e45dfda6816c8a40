use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::bitfinex::types::{
    BitfinexAccountInfo, BitfinexBalance, BitfinexNewOrderResult, BitfinexOrder,
    BitfinexOrderBook, BitfinexTicker,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Bitfinex v1 REST API client
#[derive(Debug)]
pub struct BitfinexRest {
    client: RestClient,
}

impl BitfinexRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// v1 errors are objects carrying `message` or `error`.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let value: Value = decode_json(exchange, response)?;

        if let Some(object) = value.as_object() {
            if let Some(error) = object.get("message").or_else(|| object.get("error")) {
                return Err(ExchangeError::exchange_reported(exchange, error));
            }
        }

        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} response: {}",
                exchange, e
            ))
        })
    }

    pub async fn get_order_book(&self, symbol: &str) -> Result<BitfinexOrderBook, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/book/{}", symbol));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_ticker(&self, symbol: &str) -> Result<BitfinexTicker, ExchangeError> {
        let request = SignableRequest::get(format!("/v1/pubticker/{}", symbol));
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_active_orders(&self) -> Result<Vec<BitfinexOrder>, ExchangeError> {
        let response = self.client.private(SignableRequest::post("/v1/orders")).await?;
        self.handle_response(&response)
    }

    pub async fn new_order(
        &self,
        symbol: &str,
        side: &str,
        amount: String,
        price: String,
    ) -> Result<BitfinexNewOrderResult, ExchangeError> {
        let request = SignableRequest::post("/v1/order/new").with_json(json!({
            "symbol": symbol,
            "amount": amount,
            "price": price,
            "exchange": "bitfinex",
            "side": side,
            "type": "exchange limit",
        }));
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let id: u64 = order_id.parse().map_err(|_| {
            ExchangeError::InvalidParameters(format!(
                "Bitfinex order ids are numeric: {}",
                order_id
            ))
        })?;
        let request =
            SignableRequest::post("/v1/order/cancel").with_json(json!({ "order_id": id }));
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_balances(&self) -> Result<Vec<BitfinexBalance>, ExchangeError> {
        let response = self.client.private(SignableRequest::post("/v1/balances")).await?;
        self.handle_response(&response)
    }

    pub async fn get_account_info(&self) -> Result<BitfinexAccountInfo, ExchangeError> {
        let response = self
            .client
            .private(SignableRequest::post("/v1/account_infos"))
            .await?;
        let infos: Vec<BitfinexAccountInfo> = self.handle_response(&response)?;
        infos.into_iter().next().ok_or_else(|| {
            ExchangeError::DeserializationError("Bitfinex returned no account info".to_string())
        })
    }
}
