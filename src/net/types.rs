//! JSON payloads returned by the storefront API.
//!
//! DESIGN
//! ======
//! The listing endpoint serializes `price` as a decimal string while older
//! fixtures send a JSON number, and `exchange` is only ever checked for
//! truthiness. Both are decoded leniently. Numeric prices follow the
//! browser's number-to-text rules; a null or missing price renders as an
//! empty string rather than the literal `null`/`undefined`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::num::FpCategory;

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Listing detail as returned by `GET /api/listings/{id}/`.
///
/// Unknown fields (`ok`, `requires_login`, ...) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ListingDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub description: Option<String>,
    /// Any JSON value; only its truthiness matters.
    #[serde(default)]
    pub exchange: Value,
    /// Image URL; an empty string counts as absent.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
}

impl ListingDetail {
    #[must_use]
    pub fn has_exchange(&self) -> bool {
        is_truthy(&self.exchange)
    }

    /// Image URL when present and non-empty.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }
}

/// Price text exactly as it should follow the currency prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Price(String);

impl Price {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_value(value: &Value) -> Self {
        let text = match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => number_text(n),
            other => other.to_string(),
        };
        Self(text)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Number text as a browser prints it: shortest round-trip digits, plain
/// decimal for exponents -7 < e < 21, `1e+21` / `1e-7` style outside that.
fn number_text(n: &Number) -> String {
    let Some(v) = n.as_f64() else {
        return n.to_string();
    };
    if v.classify() == FpCategory::Zero {
        return "0".to_owned();
    }
    let sci = format!("{v:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    match exp.parse::<i32>() {
        Ok(e) if (-6..21).contains(&e) => format!("{v}"),
        Ok(e) if e >= 21 => format!("{mantissa}e+{e}"),
        _ => sci,
    }
}

/// Script-style truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
