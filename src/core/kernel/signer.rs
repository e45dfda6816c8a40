use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::encode_form;
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Method;
use serde_json::Value;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Request body before encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded`, parameter order preserved.
    Form(Vec<(String, String)>),
    Json(Value),
}

impl RequestBody {
    /// Encoded body and its content type. Encoding is deterministic, so a signer and the
    /// transport always see the same bytes.
    pub fn encode(&self) -> Result<Option<(&'static str, String)>, ExchangeError> {
        match self {
            Self::Empty => Ok(None),
            Self::Form(params) => Ok(Some((
                "application/x-www-form-urlencoded",
                encode_form(params),
            ))),
            Self::Json(value) => Ok(Some(("application/json", serde_json::to_string(value)?))),
        }
    }

    /// Encoded body text, empty when there is none.
    pub fn encoded_text(&self) -> Result<String, ExchangeError> {
        Ok(self.encode()?.map(|(_, body)| body).unwrap_or_default())
    }
}

/// A request an exchange signer may still modify: add headers, append query or form
/// parameters, or embed fields into the JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SignableRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl SignableRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_form(mut self, params: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(params);
        self
    }

    pub fn with_json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        encode_form(&self.query)
    }

    /// Path plus query string, as several exchanges include it in the signed payload.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }
}

/// Per-exchange authentication strategy.
///
/// Implementations are pure given the request and nonce, so MAC construction can be tested
/// without any transport.
pub trait Signer: Send + Sync {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    Hex,
    HexUpper,
    Base64,
}

impl SignatureEncoding {
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::HexUpper => hex::encode_upper(bytes),
            Self::Base64 => general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// HMAC keyed with an exchange secret.
#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
    algorithm: HmacAlgorithm,
    encoding: SignatureEncoding,
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &self.algorithm)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl HmacSigner {
    /// Key is the raw secret text.
    pub fn new(secret: &str, algorithm: HmacAlgorithm, encoding: SignatureEncoding) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            algorithm,
            encoding,
        }
    }

    /// Key is the base64 decoding of the secret, as Kraken and Coinbase issue them.
    pub fn from_base64_secret(
        secret: &str,
        algorithm: HmacAlgorithm,
        encoding: SignatureEncoding,
    ) -> Result<Self, ExchangeError> {
        let key = general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| ExchangeError::AuthError(format!("Secret is not valid base64: {}", e)))?;
        Ok(Self {
            key,
            algorithm,
            encoding,
        })
    }

    pub fn sign(&self, payload: &[u8]) -> Result<String, ExchangeError> {
        let digest = self.mac(payload)?;
        Ok(self.encoding.encode(&digest))
    }

    fn mac(&self, payload: &[u8]) -> Result<Vec<u8>, ExchangeError> {
        let invalid_key = |e: hmac::digest::InvalidLength| {
            ExchangeError::AuthError(format!("Failed to create HMAC: {}", e))
        };
        let bytes = match self.algorithm {
            HmacAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(&self.key).map_err(invalid_key)?;
                mac.update(payload);
                mac.finalize().into_bytes().to_vec()
            }
            HmacAlgorithm::Sha384 => {
                let mut mac = Hmac::<Sha384>::new_from_slice(&self.key).map_err(invalid_key)?;
                mac.update(payload);
                mac.finalize().into_bytes().to_vec()
            }
            HmacAlgorithm::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(&self.key).map_err(invalid_key)?;
                mac.update(payload);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(bytes)
    }
}

pub fn sha256_digest(bytes: &[u8]) -> Vec<u8> {
    Sha256::digest(bytes).to_vec()
}
