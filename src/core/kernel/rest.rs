use crate::core::config::{ConfigError, NetworkConfig};
use crate::core::errors::ExchangeError;
use crate::core::kernel::classifier::FailureClassifier;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::signer::{SignableRequest, Signer};
use crate::core::kernel::transport::{
    ExchangeHttpResponse, HttpRequest, HttpTransport, ReqwestTransport,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, without trailing slash
    pub base_url: String,
    /// Exchange name for logging, tracing and error messages
    pub exchange_name: String,
}

impl RestClientConfig {
    pub fn new(base_url: impl Into<String>, exchange_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            exchange_name: exchange_name.into(),
        }
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    network: NetworkConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn Signer>>,
    nonce: NonceGenerator,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            network: NetworkConfig::default(),
            transport: None,
            signer: None,
            nonce: NonceGenerator::epoch_millis(),
        }
    }

    /// Timeout and failure classification rules
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Use a specific transport instead of building a `ReqwestTransport`
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_nonce(mut self, nonce: NonceGenerator) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn build(self) -> Result<RestClient, ExchangeError> {
        self.network.validate()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(self.network.connection_timeout).map_err(|e| {
                    ConfigError::InvalidConfiguration(format!(
                        "Failed to build HTTP client: {}",
                        e
                    ))
                })?,
            ),
        };

        Ok(RestClient {
            classifier: FailureClassifier::new(&self.network),
            config: self.config,
            transport,
            signer: self.signer,
            nonce: self.nonce,
        })
    }
}

/// Sign, send once, classify. Shared by every adapter.
pub struct RestClient {
    config: RestClientConfig,
    transport: Arc<dyn HttpTransport>,
    classifier: FailureClassifier,
    signer: Option<Arc<dyn Signer>>,
    nonce: NonceGenerator,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    pub fn exchange_name(&self) -> &str {
        &self.config.exchange_name
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Unauthenticated call.
    pub async fn public(
        &self,
        request: SignableRequest,
    ) -> Result<ExchangeHttpResponse, ExchangeError> {
        self.execute(request, false).await
    }

    /// Authenticated call: draws a fresh nonce and lets the exchange signer finish the request.
    pub async fn private(
        &self,
        request: SignableRequest,
    ) -> Result<ExchangeHttpResponse, ExchangeError> {
        self.execute(request, true).await
    }

    #[instrument(skip(self, request), fields(exchange = %self.config.exchange_name, method = %request.method, path = %request.path))]
    async fn execute(
        &self,
        mut request: SignableRequest,
        authenticated: bool,
    ) -> Result<ExchangeHttpResponse, ExchangeError> {
        if authenticated {
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::AuthError(
                    "Authentication required but no signer provided".to_string(),
                )
            })?;
            signer.sign(&mut request, self.nonce.next())?;
        }

        let http_request = self.prepare(request)?;
        debug!(url = %http_request.url, "sending request");

        let response = match self.transport.send(http_request).await {
            Ok(response) => response,
            Err(error) => {
                return Err(self
                    .classifier
                    .classify_transport_error(&self.config.exchange_name, error))
            }
        };

        self.classifier
            .classify_response(&self.config.exchange_name, response)
    }

    fn prepare(&self, request: SignableRequest) -> Result<HttpRequest, ExchangeError> {
        let url = format!("{}{}", self.config.base_url, request.path_and_query());
        let mut headers = request.headers.clone();
        let body = match request.body.encode()? {
            Some((content_type, body)) => {
                if request.header("Content-Type").is_none() {
                    headers.push(("Content-Type".to_string(), content_type.to_string()));
                }
                Some(body)
            }
            None => None,
        };

        Ok(HttpRequest {
            method: request.method,
            url,
            headers,
            body,
        })
    }
}
