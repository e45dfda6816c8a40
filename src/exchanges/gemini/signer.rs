use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    HmacAlgorithm, HmacSigner, RequestBody, SignableRequest, SignatureEncoding, Signer,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Value};

/// Gemini private API signing.
///
/// The request parameters plus `request` and `nonce` form a JSON payload which travels
/// base64-encoded in `X-GEMINI-PAYLOAD`; the signature is the hex HMAC-SHA384 of that
/// base64 text. The HTTP body stays empty.
pub struct GeminiSigner {
    api_key: String,
    hmac: HmacSigner,
}

impl GeminiSigner {
    pub fn new(api_key: &str, secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            hmac: HmacSigner::new(secret, HmacAlgorithm::Sha384, SignatureEncoding::Hex),
        }
    }
}

impl Signer for GeminiSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        let mut payload = match std::mem::replace(&mut request.body, RequestBody::Empty) {
            RequestBody::Json(Value::Object(params)) => params,
            RequestBody::Empty => Map::new(),
            _ => {
                return Err(ExchangeError::InvalidParameters(
                    "Gemini payload parameters must be a JSON object".to_string(),
                ))
            }
        };
        payload.insert("request".to_string(), Value::from(request.path.clone()));
        payload.insert("nonce".to_string(), Value::from(nonce));

        let encoded = general_purpose::STANDARD.encode(serde_json::to_string(&payload)?);
        let signature = self.hmac.sign(encoded.as_bytes())?;

        request.add_header("Content-Type", "text/plain");
        request.add_header("X-GEMINI-APIKEY", self.api_key.clone());
        request.add_header("X-GEMINI-PAYLOAD", encoded);
        request.add_header("X-GEMINI-SIGNATURE", signature);
        request.add_header("Cache-Control", "no-cache");
        Ok(())
    }
}
