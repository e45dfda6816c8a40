use crate::core::config::NetworkConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::transport::{ExchangeHttpResponse, TransportError};
use tracing::warn;

/// Labels the outcome of one transport attempt as success, retryable or fatal.
///
/// Matching of error messages is a plain case-sensitive substring test against the transport's
/// error text. A reworded library message silently stops matching, so the configured list
/// must track the HTTP stack's wording.
#[derive(Debug, Clone, Default)]
pub struct FailureClassifier {
    non_fatal_error_codes: Vec<u16>,
    non_fatal_error_messages: Vec<String>,
}

impl FailureClassifier {
    pub fn new(network: &NetworkConfig) -> Self {
        Self {
            non_fatal_error_codes: network.non_fatal_error_codes.clone(),
            non_fatal_error_messages: network
                .non_fatal_error_messages
                .iter()
                .filter(|message| !message.is_empty())
                .cloned()
                .collect(),
        }
    }

    pub fn is_non_fatal_status(&self, status_code: u16) -> bool {
        self.non_fatal_error_codes.contains(&status_code)
    }

    pub fn is_non_fatal_message(&self, message: &str) -> bool {
        self.non_fatal_error_messages
            .iter()
            .any(|fragment| message.contains(fragment.as_str()))
    }

    pub fn classify_transport_error(&self, exchange: &str, error: TransportError) -> ExchangeError {
        if self.is_non_fatal_message(&error.message) {
            warn!(exchange, error = %error.message, "retryable transport failure");
            ExchangeError::NetworkError {
                message: format!("{}: {}", exchange, error.message),
                status: None,
            }
        } else {
            ExchangeError::TransportError(format!("{}: {}", exchange, error.message))
        }
    }

    pub fn classify_response(
        &self,
        exchange: &str,
        response: ExchangeHttpResponse,
    ) -> Result<ExchangeHttpResponse, ExchangeError> {
        if response.is_success() {
            return Ok(response);
        }

        if self.is_non_fatal_status(response.status_code) {
            warn!(
                exchange,
                status = response.status_code,
                "retryable HTTP status"
            );
            return Err(ExchangeError::NetworkError {
                message: format!(
                    "{} returned {} {}",
                    exchange, response.status_code, response.status_text
                ),
                status: Some(response.status_code),
            });
        }

        Err(ExchangeError::ApiError {
            code: i32::from(response.status_code),
            message: format!(
                "{} returned {} {}: {}",
                exchange, response.status_code, response.status_text, response.body
            ),
        })
    }
}
