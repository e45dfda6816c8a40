use thiserror::Error;

/// The two failure kinds surfaced to the trading engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transient transport or rate-limit condition. The caller may retry with its own backoff.
    RetryableNetwork,
    /// Everything else. Never retried by this crate.
    Fatal,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        status: Option<u16>,
    },

    #[error("API error: {code} - {message}")]
    ApiError { code: i32, message: String },

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NetworkError { .. } => ErrorKind::RetryableNetwork,
            _ => ErrorKind::Fatal,
        }
    }

    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::RetryableNetwork)
    }

    /// Business error reported by an exchange inside its response envelope.
    pub fn exchange_reported(exchange: &str, message: impl std::fmt::Display) -> Self {
        Self::ApiError {
            code: -1,
            message: format!("{} rejected the request: {}", exchange, message),
        }
    }
}
