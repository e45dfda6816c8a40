use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    HmacAlgorithm, HmacSigner, SignableRequest, SignatureEncoding, Signer,
};

/// Binance SIGNED endpoints: `timestamp` is appended to the query, and `signature` is the hex
/// HMAC-SHA256 of the resulting query string.
pub struct BinanceSigner {
    api_key: String,
    hmac: HmacSigner,
}

impl BinanceSigner {
    pub fn new(api_key: &str, secret_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            hmac: HmacSigner::new(secret_key, HmacAlgorithm::Sha256, SignatureEncoding::Hex),
        }
    }
}

impl Signer for BinanceSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        request
            .query
            .push(("timestamp".to_string(), nonce.to_string()));
        let signature = self.hmac.sign(request.query_string().as_bytes())?;
        request.query.push(("signature".to_string(), signature));
        request.add_header("X-MBX-APIKEY", self.api_key.clone());
        Ok(())
    }
}
