use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    sha256_digest, HmacAlgorithm, HmacSigner, RequestBody, SignableRequest, SignatureEncoding,
    Signer,
};

/// Kraken private endpoint signing.
///
/// `API-Sign = base64(HMAC-SHA512(base64decode(secret), path + SHA256(nonce + postdata)))`
/// with the nonce also sent as the first form parameter.
pub struct KrakenSigner {
    api_key: String,
    hmac: HmacSigner,
}

impl KrakenSigner {
    pub fn new(api_key: &str, secret: &str) -> Result<Self, ExchangeError> {
        Ok(Self {
            api_key: api_key.to_string(),
            hmac: HmacSigner::from_base64_secret(
                secret,
                HmacAlgorithm::Sha512,
                SignatureEncoding::Base64,
            )?,
        })
    }
}

impl Signer for KrakenSigner {
    fn sign(&self, request: &mut SignableRequest, nonce: u64) -> Result<(), ExchangeError> {
        let mut params = match std::mem::replace(&mut request.body, RequestBody::Empty) {
            RequestBody::Form(params) => params,
            RequestBody::Empty => Vec::new(),
            RequestBody::Json(_) => {
                return Err(ExchangeError::InvalidParameters(
                    "Kraken private endpoints take form bodies".to_string(),
                ))
            }
        };
        params.insert(0, ("nonce".to_string(), nonce.to_string()));
        request.body = RequestBody::Form(params);

        let post_data = request.body.encoded_text()?;
        let mut message = request.path.as_bytes().to_vec();
        message.extend(sha256_digest(format!("{}{}", nonce, post_data).as_bytes()));

        request.add_header("API-Key", self.api_key.clone());
        request.add_header("API-Sign", self.hmac.sign(&message)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str =
        "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

    fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_add_order_signature_matches_published_example() {
        let signer = KrakenSigner::new("api-key", SECRET).unwrap();
        let mut request = SignableRequest::post("/0/private/AddOrder").with_form(form(&[
            ("ordertype", "limit"),
            ("pair", "XBTUSD"),
            ("price", "37500"),
            ("type", "buy"),
            ("volume", "1.25"),
        ]));
        signer.sign(&mut request, 1_616_492_376_594).unwrap();

        assert_eq!(
            request.body.encoded_text().unwrap(),
            "nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25"
        );
        assert_eq!(request.header("API-Key"), Some("api-key"));
        assert_eq!(
            request.header("API-Sign"),
            Some("4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32bAb0nmbRn6H8ndwLUQ==")
        );
    }

    #[test]
    fn test_empty_body_gets_a_nonce_form() {
        let signer = KrakenSigner::new("api-key", SECRET).unwrap();
        let mut request = SignableRequest::post("/0/private/Balance");
        signer.sign(&mut request, 1_616_492_376_594).unwrap();

        assert_eq!(request.body.encoded_text().unwrap(), "nonce=1616492376594");
        assert_eq!(
            request.header("API-Sign"),
            Some("1nH4vwR+8FHiYh1QT649xXkGd3JR3x0DWkgv3u9Ed/Qqv6KPtgQpEU4m+Emb/VgpEji3j1XNwI+HCbfXxmrTOg==")
        );
    }

    #[test]
    fn test_secret_must_be_base64() {
        assert!(matches!(
            KrakenSigner::new("api-key", "%%%"),
            Err(ExchangeError::AuthError(_))
        ));
    }
}
