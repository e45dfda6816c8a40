use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::binance::types::{
    BinanceAccountInfo, BinanceError, BinanceOrder, BinanceOrderBook, BinanceOrderResponse,
    BinanceTicker24h,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Thin typed wrapper around `RestClient` for the Binance spot API
#[derive(Debug)]
pub struct BinanceRest {
    client: RestClient,
}

impl BinanceRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// A `{"code": <negative>, "msg": ...}` object is a rejection even on HTTP 200.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let value: Value = decode_json(exchange, response)?;
        if value.get("code").is_some() && value.get("msg").is_some() {
            if let Ok(error) = serde_json::from_value::<BinanceError>(value.clone()) {
                if error.code < 0 {
                    return Err(ExchangeError::ApiError {
                        code: error.code,
                        message: format!("{} rejected the request: {}", exchange, error.msg),
                    });
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

    pub async fn get_order_book(&self, symbol: &str) -> Result<BinanceOrderBook, ExchangeError> {
        let request = SignableRequest::get("/api/v3/depth")
            .with_query("symbol", symbol)
            .with_query("limit", "100");
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_ticker_24h(&self, symbol: &str) -> Result<BinanceTicker24h, ExchangeError> {
        let request = SignableRequest::get("/api/v3/ticker/24hr").with_query("symbol", symbol);
        let response = self.client.public(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_open_orders(&self, symbol: &str) -> Result<Vec<BinanceOrder>, ExchangeError> {
        let request = SignableRequest::get("/api/v3/openOrders").with_query("symbol", symbol);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    /// GTC limit order. Parameters travel in the query so they are covered by the signature.
    pub async fn place_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: &str,
        price: &str,
    ) -> Result<BinanceOrderResponse, ExchangeError> {
        let request = SignableRequest::post("/api/v3/order")
            .with_query("symbol", symbol)
            .with_query("side", side)
            .with_query("type", "LIMIT")
            .with_query("timeInForce", "GTC")
            .with_query("quantity", quantity)
            .with_query("price", price);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: &str,
    ) -> Result<BinanceOrderResponse, ExchangeError> {
        let request = SignableRequest::delete("/api/v3/order")
            .with_query("symbol", symbol)
            .with_query("orderId", order_id);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_account_info(&self) -> Result<BinanceAccountInfo, ExchangeError> {
        let response = self
            .client
            .private(SignableRequest::get("/api/v3/account"))
            .await?;
        self.handle_response(&response)
    }
}
