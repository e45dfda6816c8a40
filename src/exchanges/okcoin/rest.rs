use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::okcoin::types::{
    OkcoinAccountBalance, OkcoinCancelRequest, OkcoinOrder, OkcoinOrderBook, OkcoinOrderRequest,
    OkcoinOrderResult, OkcoinResponse, OkcoinTicker, OkcoinTradeFee,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// OKCoin v5 REST API client
#[derive(Debug)]
pub struct OkcoinRest {
    client: RestClient,
}

impl OkcoinRest {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Maps OKCoin error codes to `ExchangeError` variants. All of them are fatal.
    fn map_okcoin_error(&self, code: &str, message: &str) -> ExchangeError {
        let exchange = self.client.exchange_name();
        match code {
            // Authentication errors
            "50100" | "50101" | "50102" | "50103" | "50104" | "50105" | "50111" | "50113" => {
                ExchangeError::AuthError(format!(
                    "{} authentication failed: {} - {}",
                    exchange, code, message
                ))
            }

            // Invalid parameter errors
            "51000" | "51001" | "51002" | "51003" | "51004" | "51005" => {
                ExchangeError::InvalidParameters(format!(
                    "Invalid parameter: {} - {}",
                    code, message
                ))
            }
            "51008" => {
                ExchangeError::InvalidParameters(format!("Insufficient balance: {}", message))
            }

            // Order does not exist / already filled or cancelled
            "51400" | "51401" | "51402" | "51603" => ExchangeError::ApiError {
                code: code.parse().unwrap_or(-1),
                message: format!("{} order error: {} - {}", exchange, code, message),
            },

            _ => ExchangeError::ApiError {
                code: code.parse().unwrap_or(-1),
                message: format!("{} rejected the request: {} - {}", exchange, code, message),
            },
        }
    }

    /// Checks the `code` envelope and decodes `data`.
    ///
    /// A batch-style failure (`code` "1", "2") carries the real reason in the first item's
    /// `sCode` / `sMsg`.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let envelope: OkcoinResponse = decode_json(self.client.exchange_name(), response)?;

        if envelope.code != "0" {
            let item = envelope.data.as_array().and_then(|items| items.first());
            let item_code = item.and_then(|i| i.get("sCode")).and_then(Value::as_str);
            let item_msg = item.and_then(|i| i.get("sMsg")).and_then(Value::as_str);
            return Err(match (item_code, item_msg) {
                (Some(code), Some(msg)) if code != "0" => self.map_okcoin_error(code, msg),
                _ => self.map_okcoin_error(&envelope.code, &envelope.msg),
            });
        }

        serde_json::from_value(envelope.data).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} data: {}",
                self.client.exchange_name(),
                e
            ))
        })
    }

    /// For endpoints returning a one-element `data` array.
    fn handle_single_item_response<T>(
        &self,
        response: &ExchangeHttpResponse,
        what: &str,
    ) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let items: Vec<T> = self.handle_response(response)?;
        items.into_iter().next().ok_or_else(|| {
            ExchangeError::DeserializationError(format!(
                "{} returned no {}",
                self.client.exchange_name(),
                what
            ))
        })
    }

    pub async fn get_order_book(&self, inst_id: &str) -> Result<OkcoinOrderBook, ExchangeError> {
        let request = SignableRequest::get("/api/v5/market/books")
            .with_query("instId", inst_id)
            .with_query("sz", "400");
        let response = self.client.public(request).await?;
        self.handle_single_item_response(&response, "order book")
    }

    pub async fn get_ticker(&self, inst_id: &str) -> Result<OkcoinTicker, ExchangeError> {
        let request = SignableRequest::get("/api/v5/market/ticker").with_query("instId", inst_id);
        let response = self.client.public(request).await?;
        self.handle_single_item_response(&response, "ticker")
    }

    pub async fn get_pending_orders(
        &self,
        inst_id: &str,
    ) -> Result<Vec<OkcoinOrder>, ExchangeError> {
        let request = SignableRequest::get("/api/v5/trade/orders-pending")
            .with_query("instType", "SPOT")
            .with_query("instId", inst_id);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn place_order(
        &self,
        order: &OkcoinOrderRequest,
    ) -> Result<OkcoinOrderResult, ExchangeError> {
        let request =
            SignableRequest::post("/api/v5/trade/order").with_json(serde_json::to_value(order)?);
        let response = self.client.private(request).await?;
        let result: OkcoinOrderResult = self.handle_single_item_response(&response, "order result")?;
        if result.s_code != "0" {
            return Err(self.map_okcoin_error(&result.s_code, &result.s_msg));
        }
        Ok(result)
    }

    pub async fn cancel_order(
        &self,
        cancel: &OkcoinCancelRequest,
    ) -> Result<OkcoinOrderResult, ExchangeError> {
        let request = SignableRequest::post("/api/v5/trade/cancel-order")
            .with_json(serde_json::to_value(cancel)?);
        let response = self.client.private(request).await?;
        self.handle_single_item_response(&response, "cancel result")
    }

    pub async fn get_balance(&self) -> Result<OkcoinAccountBalance, ExchangeError> {
        let response = self
            .client
            .private(SignableRequest::get("/api/v5/account/balance"))
            .await?;
        self.handle_single_item_response(&response, "balance")
    }

    pub async fn get_trade_fee(&self, inst_id: &str) -> Result<OkcoinTradeFee, ExchangeError> {
        let request = SignableRequest::get("/api/v5/account/trade-fee")
            .with_query("instType", "SPOT")
            .with_query("instId", inst_id);
        let response = self.client.private(request).await?;
        self.handle_single_item_response(&response, "trade fee")
    }
}
