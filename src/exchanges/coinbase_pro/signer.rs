use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    HmacAlgorithm, HmacSigner, SignableRequest, SignatureEncoding, Signer,
};

/// Coinbase Pro signing: base64 HMAC-SHA256, keyed with the base64-decoded secret, over
/// `timestamp + METHOD + requestPath + body`. The timestamp is in seconds with millisecond
/// fraction, derived from the nonce.
pub struct CoinbaseProSigner {
    api_key: String,
    passphrase: String,
    hmac: HmacSigner,
}

impl CoinbaseProSigner {
    pub fn new(api_key: &str, secret: &str, passphrase: &str) -> Result<Self, ExchangeError> {
        Ok(Self {
            api_key: api_key.to_string(),
            passphrase: passphrase.to_string(),
            hmac: HmacSigner::from_base64_secret(
                secret,
                HmacAlgorithm::Sha256,
                SignatureEncoding::Base64,
            )?,
        })
    }
}

impl Signer for CoinbaseProSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        let timestamp = format!("{}.{:03}", nonce / 1000, nonce % 1000);
        let prehash = format!(
            "{}{}{}{}",
            timestamp,
            request.method.as_str(),
            request.path_and_query(),
            request.body.encoded_text()?
        );
        let signature = self.hmac.sign(prehash.as_bytes())?;

        request.add_header("CB-ACCESS-KEY", self.api_key.clone());
        request.add_header("CB-ACCESS-SIGN", signature);
        request.add_header("CB-ACCESS-TIMESTAMP", timestamp);
        request.add_header("CB-ACCESS-PASSPHRASE", self.passphrase.clone());
        Ok(())
    }
}
