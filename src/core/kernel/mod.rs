/// Exchange-agnostic request pipeline shared by every adapter.
///
/// # Architecture
///
/// - `transport`: `HttpTransport` performs exactly one HTTP call and returns an
///   `ExchangeHttpResponse` or a `TransportError`. `ReqwestTransport` is the production
///   implementation, `ReplayTransport` replays canned outcomes.
/// - `classifier`: `FailureClassifier` labels each outcome as success, retryable network
///   failure or fatal failure from the configured status codes and message fragments.
/// - `signer`: the `Signer` strategy trait plus the `HmacSigner` primitive
///   (SHA-256/384/512, hex or base64).
/// - `nonce`: strictly increasing `NonceGenerator`.
/// - `codec`: locale-independent `DecimalFormat`, form encoding, JSON decoding and
///   timestamp conversion.
/// - `rest`: `RestClient` ties the above together: sign, send once, classify.
///
/// Nothing in the kernel retries. Only the caller knows whether an action is safe to repeat.
///
/// # Example
/// ```rust,no_run
/// use tradebridge::core::config::NetworkConfig;
/// use tradebridge::core::kernel::*;
///
/// # async fn example() -> Result<(), tradebridge::ExchangeError> {
/// let rest = RestClientBuilder::new(RestClientConfig::new("https://api.kraken.com", "Kraken"))
///     .with_network(NetworkConfig::default())
///     .build()?;
/// let response = rest
///     .public(SignableRequest::get("/0/public/Time"))
///     .await?;
/// println!("{}", response.body);
/// # Ok(())
/// # }
/// ```
pub mod classifier;
pub mod codec;
pub mod nonce;
pub mod rest;
pub mod signer;
pub mod transport;

// Re-export key types for convenience
pub use classifier::FailureClassifier;
pub use codec::{
    decode_json, decimal_from_value, encode_form, market_orders_from_levels, DecimalFormat,
    OrderFormats,
};
pub use nonce::{NonceGenerator, NonceSource};
pub use rest::{RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{
    sha256_digest, HmacAlgorithm, HmacSigner, RequestBody, SignableRequest, SignatureEncoding,
    Signer,
};
pub use transport::{
    ExchangeHttpResponse, HttpRequest, HttpTransport, ReplayTransport, ReqwestTransport,
    TransportError, TransportErrorKind,
};
