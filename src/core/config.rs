use rust_decimal::Decimal;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Aggregate configuration handed to an adapter's `init`.
///
/// Produced by an external loader; the adapter reads it exactly once and keeps only what it
/// extracted during initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub name: String,
    /// Overrides the adapter's public API root, e.g. to point at a sandbox.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub authentication: AuthenticationConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub other: OtherConfig,
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_authentication(mut self, authentication: AuthenticationConfig) -> Self {
        self.authentication = authentication;
        self
    }

    #[must_use]
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    #[must_use]
    pub fn with_other(mut self, other: OtherConfig) -> Self {
        self.other = other;
        self
    }

    /// The configured base URL, or the adapter's default.
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| default.to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Named credential items. The set of names varies per exchange
/// (`key`, `secret`, `passphrase`, `client-id`, `userId`, ...).
#[derive(Clone, Default)]
pub struct AuthenticationConfig {
    items: HashMap<String, Secret<String>>,
}

impl AuthenticationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(name.into(), Secret::new(value.into()));
        self
    }

    /// Get an item (use carefully - exposes secret)
    pub fn item(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(|value| value.expose_secret().as_str())
    }

    /// Get a mandatory item, rejecting absent and blank values.
    pub fn require(&self, name: &str) -> Result<&str, ConfigError> {
        match self.item(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingItem(format!(
                "authentication item '{}'",
                name
            ))),
        }
    }
}

impl fmt::Debug for AuthenticationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.items.keys().collect();
        names.sort();
        f.debug_struct("AuthenticationConfig")
            .field("items", &names)
            .finish_non_exhaustive()
    }
}

// Never expose secrets in serialization
impl Serialize for AuthenticationConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut names: Vec<&String> = self.items.keys().collect();
        names.sort();
        let mut map = serializer.serialize_map(Some(names.len()))?;
        for name in names {
            map.serialize_entry(name, "[REDACTED]")?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AuthenticationConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(Self {
            items: raw
                .into_iter()
                .map(|(name, value)| (name, Secret::new(value)))
                .collect(),
        })
    }
}

/// Transport settings shared by every adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bounds both the connect and the read phase, in seconds.
    pub connection_timeout: u64,
    /// HTTP status codes classified as retryable network failures.
    #[serde(default)]
    pub non_fatal_error_codes: Vec<u16>,
    /// Substrings of transport error messages classified as retryable (case-sensitive).
    #[serde(default)]
    pub non_fatal_error_messages: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connection_timeout: 30,
            non_fatal_error_codes: vec![502, 503, 504, 520, 522, 525],
            non_fatal_error_messages: vec![
                "Connection refused".to_string(),
                "Connection reset".to_string(),
                "Remote host closed connection during handshake".to_string(),
                "connection closed before message completed".to_string(),
            ],
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn new(connection_timeout: u64) -> Self {
        Self {
            connection_timeout,
            non_fatal_error_codes: Vec::new(),
            non_fatal_error_messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_non_fatal_error_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.non_fatal_error_codes = codes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_non_fatal_error_messages<S: Into<String>>(
        mut self,
        messages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.non_fatal_error_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection_timeout == 0 {
            return Err(ConfigError::InvalidItem(
                "connection_timeout must be a positive number of seconds".to_string(),
            ));
        }
        Ok(())
    }
}

/// Free-form named items: fee percentages, feature toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtherConfig {
    items: HashMap<String, String>,
}

impl OtherConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(name.into(), value.into());
        self
    }

    pub fn item(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, ConfigError> {
        match self.item(name) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim()),
            _ => Err(ConfigError::MissingItem(format!("other item '{}'", name))),
        }
    }

    pub fn require_decimal(&self, name: &str) -> Result<Decimal, ConfigError> {
        let raw = self.require(name)?;
        raw.parse::<Decimal>().map_err(|e| {
            ConfigError::InvalidItem(format!("'{}' is not a decimal ({}): {}", name, raw, e))
        })
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
        match self.item(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<bool>().map(Some).map_err(|_| {
                ConfigError::InvalidItem(format!("'{}' is not a boolean: {}", name, raw))
            }),
        }
    }

    pub fn require_bool(&self, name: &str) -> Result<bool, ConfigError> {
        self.get_bool(name)?
            .ok_or_else(|| ConfigError::MissingItem(format!("other item '{}'", name)))
    }
}

/// Fixed fee rates for exchanges that do not expose their fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticFees {
    /// Fraction of a buy order taken as fee, e.g. `0.0025`.
    pub buy: Decimal,
    /// Fraction of a sell order taken as fee.
    pub sell: Decimal,
}

impl StaticFees {
    /// Reads `buy-fee` and `sell-fee`, configured as percentages (`0.25` means 0.25 %).
    pub fn from_other_config(other: &OtherConfig) -> Result<Self, ConfigError> {
        let hundred = Decimal::ONE_HUNDRED;
        let buy = other.require_decimal("buy-fee")?;
        let sell = other.require_decimal("sell-fee")?;
        if buy.is_sign_negative() || sell.is_sign_negative() {
            return Err(ConfigError::InvalidItem(
                "fee percentages cannot be negative".to_string(),
            ));
        }
        Ok(Self {
            buy: buy / hundred,
            sell: sell / hundred,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    MissingItem(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_require_rejects_blank_items() {
        let auth = AuthenticationConfig::new()
            .with_item("key", "abc")
            .with_item("secret", "   ");

        assert_eq!(auth.require("key").unwrap(), "abc");
        assert!(matches!(
            auth.require("secret"),
            Err(ConfigError::MissingItem(_))
        ));
        assert!(auth.require("passphrase").is_err());
    }

    #[test]
    fn test_debug_and_serialize_never_leak_secrets() {
        let auth = AuthenticationConfig::new().with_item("secret", "top-secret-value");

        let debug = format!("{:?}", auth);
        assert!(!debug.contains("top-secret-value"));

        let json = serde_json::to_string(&auth).unwrap();
        assert_eq!(json, r#"{"secret":"[REDACTED]"}"#);
    }

    #[test]
    fn test_deserialize_full_exchange_config() {
        let raw = r#"{
            "name": "Kraken",
            "authentication": {"key": "k", "secret": "s"},
            "network": {
                "connection_timeout": 20,
                "non_fatal_error_codes": [502, 503],
                "non_fatal_error_messages": ["Connection reset"]
            },
            "other": {"buy-fee": "0.26", "sell-fee": "0.26"}
        }"#;

        let config: ExchangeConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.name, "Kraken");
        assert_eq!(config.authentication.require("secret").unwrap(), "s");
        assert_eq!(config.network.connection_timeout, 20);
        assert_eq!(config.network.non_fatal_error_codes, vec![502, 503]);
        assert_eq!(config.other.item("buy-fee"), Some("0.26"));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_non_positive_timeout_is_rejected() {
        assert!(NetworkConfig::new(0).validate().is_err());
        assert!(NetworkConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_static_fees_are_converted_from_percentages() {
        let other = OtherConfig::new()
            .with_item("buy-fee", "0.25")
            .with_item("sell-fee", "0.1");

        let fees = StaticFees::from_other_config(&other).unwrap();
        assert_eq!(fees.buy, dec!(0.0025));
        assert_eq!(fees.sell, dec!(0.001));

        let missing = OtherConfig::new().with_item("buy-fee", "0.25");
        assert!(StaticFees::from_other_config(&missing).is_err());

        let garbage = OtherConfig::new()
            .with_item("buy-fee", "abc")
            .with_item("sell-fee", "0.1");
        assert!(matches!(
            StaticFees::from_other_config(&garbage),
            Err(ConfigError::InvalidItem(_))
        ));
    }

    #[test]
    fn test_boolean_items() {
        let other = OtherConfig::new()
            .with_item("use-global-trading-fee", "true")
            .with_item("broken", "yes");

        assert!(other.require_bool("use-global-trading-fee").unwrap());
        assert!(other.get_bool("absent").unwrap().is_none());
        assert!(other.require_bool("absent").is_err());
        assert!(other.get_bool("broken").is_err());
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let config = ExchangeConfig::new("Gemini").with_base_url("http://127.0.0.1:1234/");
        assert_eq!(
            config.base_url_or("https://api.gemini.com"),
            "http://127.0.0.1:1234"
        );
        assert_eq!(
            ExchangeConfig::new("Gemini").base_url_or("https://api.gemini.com"),
            "https://api.gemini.com"
        );
    }
}
