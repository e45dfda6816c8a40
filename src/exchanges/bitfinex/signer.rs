use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    HmacAlgorithm, HmacSigner, RequestBody, SignableRequest, SignatureEncoding, Signer,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Value};

/// Bitfinex v1 authenticated endpoints.
///
/// The JSON payload (`request`, string `nonce`, call parameters) is sent as the body and,
/// base64-encoded, in `X-BFX-PAYLOAD`; `X-BFX-SIGNATURE` is the hex HMAC-SHA384 of the
/// base64 text.
pub struct BitfinexSigner {
    api_key: String,
    hmac: HmacSigner,
}

impl BitfinexSigner {
    pub fn new(api_key: &str, secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            hmac: HmacSigner::new(secret, HmacAlgorithm::Sha384, SignatureEncoding::Hex),
        }
    }
}

impl Signer for BitfinexSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        let mut payload = match std::mem::replace(&mut request.body, RequestBody::Empty) {
            RequestBody::Json(Value::Object(params)) => params,
            RequestBody::Empty => Map::new(),
            _ => {
                return Err(ExchangeError::InvalidParameters(
                    "Bitfinex payload parameters must be a JSON object".to_string(),
                ))
            }
        };
        payload.insert("request".to_string(), Value::from(request.path.clone()));
        payload.insert("nonce".to_string(), Value::from(nonce.to_string()));

        let encoded = general_purpose::STANDARD.encode(serde_json::to_string(&payload)?);
        let signature = self.hmac.sign(encoded.as_bytes())?;

        request.body = RequestBody::Json(Value::Object(payload));
        request.add_header("X-BFX-APIKEY", self.api_key.clone());
        request.add_header("X-BFX-PAYLOAD", encoded);
        request.add_header("X-BFX-SIGNATURE", signature);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_headers_and_body() {
        let signer = BitfinexSigner::new("api-key", "secret");
        let mut request = SignableRequest::post("/v1/balances");
        signer.sign(&mut request, 1_420_114_800_000_000).unwrap();

        assert_eq!(request.header("X-BFX-APIKEY"), Some("api-key"));
        assert_eq!(
            request.header("X-BFX-PAYLOAD"),
            Some("eyJub25jZSI6IjE0MjAxMTQ4MDAwMDAwMDAiLCJyZXF1ZXN0IjoiL3YxL2JhbGFuY2VzIn0=")
        );
        assert_eq!(
            request.header("X-BFX-SIGNATURE"),
            Some("f8b72664d8dadcff0a7ba1f9875474b9350f01a43f33c57a0b8fa2afc38f3a90603504be3bc5588807f995e797f1e458")
        );
        assert_eq!(
            request.body.encoded_text().unwrap(),
            r#"{"nonce":"1420114800000000","request":"/v1/balances"}"#
        );
    }
}
