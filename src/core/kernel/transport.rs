use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument, trace};

/// One outgoing HTTP call, fully prepared (signed, encoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Normalized response envelope, created per call and discarded after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeHttpResponse {
    pub status_code: u16,
    pub status_text: String,
    pub body: String,
}

impl ExchangeHttpResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status_code,
            status_text,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Body,
    Request,
}

/// A call that never produced an HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    /// Full error-source chain, so OS-level texts stay visible.
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn from_reqwest(error: &reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, error_chain(error))
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Performs exactly one network call per `send`. Retry policy lives with the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<ExchangeHttpResponse, TransportError>;
}

/// Production transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// The timeout bounds both the connect and the read phase.
    pub fn new(connection_timeout_seconds: u64) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(connection_timeout_seconds);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("tradebridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::from_reqwest(&e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<ExchangeHttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        debug!(status = status.as_u16(), "response received");
        trace!("Response body: {}", body);

        Ok(ExchangeHttpResponse {
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Replays queued outcomes in FIFO order and records every request it is given.
///
/// Lets the full adapter pipeline run offline against canned exchange payloads. For tests
/// and offline replays only; it never touches the network.
#[derive(Debug, Default)]
pub struct ReplayTransport {
    outcomes: Mutex<VecDeque<Result<ExchangeHttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ReplayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_response(&self, response: ExchangeHttpResponse) {
        self.outcomes.lock().await.push_back(Ok(response));
    }

    pub async fn push_ok(&self, body: impl Into<String>) {
        self.push_response(ExchangeHttpResponse::ok(body)).await;
    }

    pub async fn push_error(&self, error: TransportError) {
        self.outcomes.lock().await.push_back(Err(error));
    }

    /// Every request sent so far, oldest first.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().await.last().cloned()
    }

    pub async fn pending(&self) -> usize {
        self.outcomes.lock().await.len()
    }
}

#[async_trait]
impl HttpTransport for ReplayTransport {
    async fn send(&self, request: HttpRequest) -> Result<ExchangeHttpResponse, TransportError> {
        let description = format!("{} {}", request.method, request.url);
        self.requests.lock().await.push(request);
        self.outcomes.lock().await.pop_front().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportErrorKind::Request,
                format!("no canned outcome left for {}", description),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: url.to_string(),
            headers: vec![("API-Key".to_string(), "abc".to_string())],
            body: None,
        }
    }

    #[tokio::test]
    async fn test_replay_transport_is_fifo_and_records() {
        let transport = ReplayTransport::new();
        transport.push_ok("first").await;
        transport
            .push_error(TransportError::new(
                TransportErrorKind::Connect,
                "Connection refused",
            ))
            .await;

        let first = transport.send(request("https://a/1")).await.unwrap();
        assert_eq!(first.body, "first");
        assert_eq!(first.status_text, "OK");

        let second = transport.send(request("https://a/2")).await.unwrap_err();
        assert_eq!(second.kind, TransportErrorKind::Connect);

        let exhausted = transport.send(request("https://a/3")).await.unwrap_err();
        assert!(exhausted.message.contains("https://a/3"));

        let sent = transport.requests().await;
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].header("api-key"), Some("abc"));
    }

    #[test]
    fn test_response_status_text() {
        let response = ExchangeHttpResponse::new(503, "");
        assert_eq!(response.status_text, "Service Unavailable");
        assert!(!response.is_success());
        assert!(ExchangeHttpResponse::new(202, "").is_success());
    }
}
