#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Once};
use tradebridge::core::config::{AuthenticationConfig, ExchangeConfig, NetworkConfig, OtherConfig};
use tradebridge::core::kernel::{HttpRequest, ReplayTransport};

static TRACING: Once = Once::new();

/// Route adapter spans and events to the test output. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Load `tests/fixtures/<exchange>/<name>`.
pub fn fixture(exchange: &str, name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", exchange, name]
        .iter()
        .collect();
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn replay() -> Arc<ReplayTransport> {
    init_tracing();
    Arc::new(ReplayTransport::new())
}

/// Config pointing at a fake host, with the given authentication and other items.
pub fn config(name: &str, auth: &[(&str, &str)], other: &[(&str, &str)]) -> ExchangeConfig {
    let authentication = auth
        .iter()
        .fold(AuthenticationConfig::new(), |acc, (key, value)| {
            acc.with_item(*key, *value)
        });
    let other = other
        .iter()
        .fold(OtherConfig::new(), |acc, (key, value)| acc.with_item(*key, *value));
    ExchangeConfig::new(name)
        .with_base_url("https://exchange.test")
        .with_authentication(authentication)
        .with_network(NetworkConfig::default())
        .with_other(other)
}

/// Decoded `k=v&k=v` pairs, order preserved.
pub fn form_params(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                urlencoding::decode(key).unwrap().into_owned(),
                urlencoding::decode(value).unwrap().into_owned(),
            )
        })
        .collect()
}

pub fn form_value(encoded: &str, name: &str) -> Option<String> {
    form_params(encoded)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

pub fn body(request: &HttpRequest) -> &str {
    request.body.as_deref().unwrap_or_default()
}

pub fn query(request: &HttpRequest) -> &str {
    request.url.split_once('?').map(|(_, q)| q).unwrap_or_default()
}

pub fn json_body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(body(request)).unwrap()
}
