use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::decode_json;
use crate::core::kernel::rest::RestClient;
use crate::core::kernel::signer::SignableRequest;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::exchanges::kraken::types::{
    KrakenAddOrderResult, KrakenAssetPair, KrakenCancelResult, KrakenOpenOrders, KrakenOrderBook,
    KrakenResponse, KrakenTicker,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::warn;

const MAINTENANCE_ERRORS: [&str; 2] = ["EService:Unavailable", "EService:Busy"];

/// Kraken REST API client
#[derive(Debug)]
pub struct KrakenRest {
    client: RestClient,
    keep_alive_during_maintenance: bool,
}

impl KrakenRest {
    pub fn new(client: RestClient, keep_alive_during_maintenance: bool) -> Self {
        Self {
            client,
            keep_alive_during_maintenance,
        }
    }

    /// Checks the `error` array (warnings, prefixed `W`, are ignored) and decodes `result`.
    fn handle_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.client.exchange_name();
        let envelope: KrakenResponse = decode_json(exchange, response)?;

        let errors: Vec<&String> = envelope
            .error
            .iter()
            .filter(|message| message.starts_with('E'))
            .collect();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|message| message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let in_maintenance = errors
                .iter()
                .any(|message| MAINTENANCE_ERRORS.iter().any(|m| message.starts_with(m)));
            if in_maintenance && self.keep_alive_during_maintenance {
                warn!(exchange, errors = %joined, "exchange in maintenance, reporting as retryable");
                return Err(ExchangeError::NetworkError {
                    message: format!("{} is unavailable: {}", exchange, joined),
                    status: None,
                });
            }
            return Err(ExchangeError::exchange_reported(exchange, joined));
        }

        let result = envelope.result.ok_or_else(|| {
            ExchangeError::DeserializationError(format!("{} response has no result", exchange))
        })?;
        serde_json::from_value(result).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to parse {} result: {}",
                exchange, e
            ))
        })
    }

    /// Public market endpoints key their result by the exchange's pair name, which may differ
    /// from the requested one (`XBTUSD` vs `XXBTZUSD`). Exactly one pair is requested.
    fn handle_pair_response<T>(&self, response: &ExchangeHttpResponse) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let by_pair: HashMap<String, T> = self.handle_response(response)?;
        by_pair.into_values().next().ok_or_else(|| {
            ExchangeError::DeserializationError(format!(
                "{} result contains no pair",
                self.client.exchange_name()
            ))
        })
    }

    pub async fn get_depth(&self, pair: &str) -> Result<KrakenOrderBook, ExchangeError> {
        let request = SignableRequest::get("/0/public/Depth").with_query("pair", pair);
        let response = self.client.public(request).await?;
        self.handle_pair_response(&response)
    }

    pub async fn get_ticker(&self, pair: &str) -> Result<KrakenTicker, ExchangeError> {
        let request = SignableRequest::get("/0/public/Ticker").with_query("pair", pair);
        let response = self.client.public(request).await?;
        self.handle_pair_response(&response)
    }

    pub async fn get_asset_pair(&self, pair: &str) -> Result<KrakenAssetPair, ExchangeError> {
        let request = SignableRequest::get("/0/public/AssetPairs").with_query("pair", pair);
        let response = self.client.public(request).await?;
        self.handle_pair_response(&response)
    }

    pub async fn get_open_orders(&self) -> Result<KrakenOpenOrders, ExchangeError> {
        let response = self
            .client
            .private(SignableRequest::post("/0/private/OpenOrders"))
            .await?;
        self.handle_response(&response)
    }

    /// `params` excludes the nonce, which the signer adds.
    pub async fn add_order(
        &self,
        params: Vec<(String, String)>,
    ) -> Result<KrakenAddOrderResult, ExchangeError> {
        let request = SignableRequest::post("/0/private/AddOrder").with_form(params);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn cancel_order(&self, txid: &str) -> Result<KrakenCancelResult, ExchangeError> {
        let request = SignableRequest::post("/0/private/CancelOrder")
            .with_form(vec![("txid".to_string(), txid.to_string())]);
        let response = self.client.private(request).await?;
        self.handle_response(&response)
    }

    pub async fn get_balance(&self) -> Result<HashMap<String, Decimal>, ExchangeError> {
        let response = self
            .client
            .private(SignableRequest::post("/0/private/Balance"))
            .await?;
        self.handle_response(&response)
    }
}
