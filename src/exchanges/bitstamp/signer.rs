use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    HmacAlgorithm, HmacSigner, RequestBody, SignableRequest, SignatureEncoding, Signer,
};

/// Bitstamp v2 signing: `HEX(HMAC-SHA256(secret, nonce + client_id + api_key))`, sent with
/// the key and nonce as form parameters.
pub struct BitstampSigner {
    client_id: String,
    api_key: String,
    hmac: HmacSigner,
}

impl BitstampSigner {
    pub fn new(client_id: &str, api_key: &str, secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            api_key: api_key.to_string(),
            hmac: HmacSigner::new(secret, HmacAlgorithm::Sha256, SignatureEncoding::HexUpper),
        }
    }
}

impl Signer for BitstampSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        let message = format!("{}{}{}", nonce, self.client_id, self.api_key);
        let signature = self.hmac.sign(message.as_bytes())?;

        let mut params = match std::mem::replace(&mut request.body, RequestBody::Empty) {
            RequestBody::Form(params) => params,
            RequestBody::Empty => Vec::new(),
            RequestBody::Json(_) => {
                return Err(ExchangeError::InvalidParameters(
                    "Bitstamp private endpoints take form bodies".to_string(),
                ))
            }
        };
        params.push(("key".to_string(), self.api_key.clone()));
        params.push(("signature".to_string(), signature));
        params.push(("nonce".to_string(), nonce.to_string()));
        request.body = RequestBody::Form(params);
        Ok(())
    }
}
