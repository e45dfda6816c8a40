use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    sha256_digest, HmacAlgorithm, HmacSigner, SignableRequest, SignatureEncoding, Signer,
};
use serde_json::json;

/// itBit signing.
///
/// `message = JSON[verb, url, body, nonce, timestamp]`, then
/// `signature = base64(HMAC-SHA512(secret, url + SHA256(nonce + message)))`. The full URL,
/// including the base, is signed.
pub struct ItbitSigner {
    api_key: String,
    base_url: String,
    hmac: HmacSigner,
}

impl ItbitSigner {
    pub fn new(api_key: &str, secret: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            hmac: HmacSigner::new(secret, HmacAlgorithm::Sha512, SignatureEncoding::Base64),
        }
    }

    /// Sign with an explicit timestamp in epoch milliseconds.
    pub fn sign_at(
        &self,
        request: &mut SignableRequest,
        nonce: u64,
        timestamp: i64,
    ) -> Result<(), ExchangeError> {
        let url = format!("{}{}", self.base_url, request.path_and_query());
        let body = request.body.encoded_text()?;
        let nonce = nonce.to_string();
        let timestamp = timestamp.to_string();

        let message = serde_json::to_string(&json!([
            request.method.as_str(),
            url,
            body,
            nonce,
            timestamp
        ]))?;
        let mut payload = url.into_bytes();
        payload.extend(sha256_digest(format!("{}{}", nonce, message).as_bytes()));
        let signature = self.hmac.sign(&payload)?;

        request.add_header("Authorization", format!("{}:{}", self.api_key, signature));
        request.add_header("X-Auth-Timestamp", timestamp);
        request.add_header("X-Auth-Nonce", nonce);
        Ok(())
    }
}

impl Signer for ItbitSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        self.sign_at(request, nonce, chrono::Utc::now().timestamp_millis())
    }
}
