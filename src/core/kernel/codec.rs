//! Marshalling between canonical values and exchange wire formats.
//!
//! Outbound numbers are formatted from explicit rules, never from the host locale. Inbound
//! parsing is strict: any value that cannot be mapped fails the whole response.

use crate::core::errors::ExchangeError;
use crate::core::kernel::transport::ExchangeHttpResponse;
use crate::core::types::{MarketOrder, OrderType};
use chrono::{DateTime, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fixed-point rendering rule for one outbound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormat {
    max_fraction_digits: u32,
    decimal_separator: char,
}

impl DecimalFormat {
    pub const fn new(max_fraction_digits: u32) -> Self {
        Self {
            max_fraction_digits,
            decimal_separator: '.',
        }
    }

    pub const fn with_separator(mut self, decimal_separator: char) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }

    pub const fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    /// Rounds half-to-even to at most `max_fraction_digits`, drops trailing zeros and never
    /// uses exponent notation.
    pub fn format(&self, value: Decimal) -> String {
        let rounded = value
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::MidpointNearestEven)
            .normalize();
        let text = if rounded.is_zero() {
            "0".to_string()
        } else {
            rounded.to_string()
        };
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }
}

/// Price and quantity rules of one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFormats {
    pub price: DecimalFormat,
    pub quantity: DecimalFormat,
}

impl OrderFormats {
    pub const fn new(price_digits: u32, quantity_digits: u32) -> Self {
        Self {
            price: DecimalFormat::new(price_digits),
            quantity: DecimalFormat::new(quantity_digits),
        }
    }
}

/// URL-encode parameters as `k=v&k=v`, preserving order.
pub fn encode_form<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

const BODY_EXCERPT: usize = 256;

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

/// Deserialize a response body. Any mismatch is a fatal failure naming the exchange.
pub fn decode_json<T: DeserializeOwned>(
    exchange: &str,
    response: &ExchangeHttpResponse,
) -> Result<T, ExchangeError> {
    serde_json::from_str(&response.body).map_err(|e| {
        ExchangeError::DeserializationError(format!(
            "Failed to parse {} response ({}): {}",
            exchange,
            e,
            excerpt(&response.body)
        ))
    })
}

pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, ExchangeError> {
    raw.trim()
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Invalid decimal in '{}': {} ({})",
                field, raw, e
            ))
        })
}

/// A JSON string or number as a decimal.
pub fn decimal_from_value(field: &str, value: &Value) -> Result<Decimal, ExchangeError> {
    match value {
        Value::String(raw) => parse_decimal(field, raw),
        Value::Number(number) => parse_decimal(field, &number.to_string()),
        other => Err(ExchangeError::DeserializationError(format!(
            "Expected a number in '{}', got {}",
            field, other
        ))),
    }
}

/// One side of an order book given as `[price, quantity, ...]` arrays. Extra elements
/// (timestamps, order counts) are ignored; a short or malformed level fails the whole side.
pub fn market_orders_from_levels(
    order_type: OrderType,
    levels: &[Vec<Value>],
) -> Result<Vec<MarketOrder>, ExchangeError> {
    levels
        .iter()
        .map(|level| match level.as_slice() {
            [price, quantity, ..] => Ok(MarketOrder::new(
                order_type,
                decimal_from_value("price", price)?,
                decimal_from_value("quantity", quantity)?,
            )),
            _ => Err(ExchangeError::DeserializationError(format!(
                "Order book level has fewer than two elements: {:?}",
                level
            ))),
        })
        .collect()
}

/// Seconds since the epoch (possibly fractional) to epoch milliseconds.
pub fn seconds_to_millis(field: &str, seconds: Decimal) -> Result<i64, ExchangeError> {
    use rust_decimal::prelude::ToPrimitive;
    (seconds * Decimal::ONE_THOUSAND)
        .trunc()
        .to_i64()
        .ok_or_else(|| {
            ExchangeError::DeserializationError(format!(
                "Timestamp out of range in '{}': {}",
                field, seconds
            ))
        })
}

pub fn parse_epoch_millis(field: &str, raw: &str) -> Result<i64, ExchangeError> {
    raw.trim().parse::<i64>().map_err(|e| {
        ExchangeError::DeserializationError(format!(
            "Invalid millisecond timestamp in '{}': {} ({})",
            field, raw, e
        ))
    })
}

pub fn parse_epoch_seconds(field: &str, raw: &str) -> Result<i64, ExchangeError> {
    seconds_to_millis(field, parse_decimal(field, raw)?)
}

/// RFC 3339 / ISO-8601 with offset, e.g. `2017-06-17T19:29:31.123Z`.
pub fn parse_iso8601_millis(field: &str, raw: &str) -> Result<i64, ExchangeError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|datetime| datetime.timestamp_millis())
        .map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Invalid ISO-8601 timestamp in '{}': {} ({})",
                field, raw, e
            ))
        })
}

/// `YYYY-MM-DD HH:MM:SS[.ffffff]`, interpreted as UTC.
pub fn parse_utc_datetime_millis(field: &str, raw: &str) -> Result<i64, ExchangeError> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .map(|datetime| datetime.and_utc().timestamp_millis())
        .map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Invalid UTC datetime in '{}': {} ({})",
                field, raw, e
            ))
        })
}

/// Millisecond timestamp as ISO-8601 with millisecond precision.
pub fn millis_to_iso8601(millis: u64) -> Result<String, ExchangeError> {
    let datetime = DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| ExchangeError::Other(format!("Invalid timestamp: {}", millis)))?;
    Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}
