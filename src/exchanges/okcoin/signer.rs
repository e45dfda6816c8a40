use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::millis_to_iso8601;
use crate::core::kernel::signer::{
    HmacAlgorithm, HmacSigner, SignableRequest, SignatureEncoding, Signer,
};

/// OKCoin v5 request signing.
///
/// The prehash string is `timestamp + METHOD + requestPath + body`, where the timestamp is
/// the nonce rendered as ISO-8601 with milliseconds and `requestPath` includes the query.
pub struct OkcoinSigner {
    api_key: String,
    passphrase: String,
    hmac: HmacSigner,
}

impl OkcoinSigner {
    pub fn new(api_key: &str, secret_key: &str, passphrase: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            passphrase: passphrase.to_string(),
            hmac: HmacSigner::new(secret_key, HmacAlgorithm::Sha256, SignatureEncoding::Base64),
        }
    }

    fn generate_signature(
        &self,
        timestamp: &str,
        request: &SignableRequest,
    ) -> Result<String, ExchangeError> {
        let prehash = format!(
            "{}{}{}{}",
            timestamp,
            request.method.as_str(),
            request.path_and_query(),
            request.body.encoded_text()?
        );
        self.hmac.sign(prehash.as_bytes())
    }
}

impl Signer for OkcoinSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        let timestamp = millis_to_iso8601(nonce)?;
        let signature = self.generate_signature(&timestamp, request)?;

        request.add_header("OK-ACCESS-KEY", self.api_key.clone());
        request.add_header("OK-ACCESS-SIGN", signature);
        request.add_header("OK-ACCESS-TIMESTAMP", timestamp);
        request.add_header("OK-ACCESS-PASSPHRASE", self.passphrase.clone());
        Ok(())
    }
}
