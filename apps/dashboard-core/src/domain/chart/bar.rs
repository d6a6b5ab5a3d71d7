//! Bar Value Types
//!
//! One OHLC data point of a price series, plus the resolution string
//! and the composite key the last-bar cache is indexed by.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A charting-library resolution string ("1", "60", "1D", ...).
///
/// Opaque here: the charting widget defines the vocabulary, this crate
/// only keys on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resolution(String);

impl Resolution {
    /// Create a resolution from the charting library's string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The resolution string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Resolution {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One OHLC(+timestamp) data point of a price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bar period.
    pub timestamp: DateTime<Utc>,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Volume, when the feed supplies one.
    #[serde(default)]
    pub volume: Option<Decimal>,
}

/// Composite key for the last-bar cache: one symbol at one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LastBarKey {
    /// Market symbol (e.g. "ETH-USD").
    pub symbol: String,
    /// Chart resolution.
    pub resolution: Resolution,
}

impl LastBarKey {
    /// Create a key for a symbol/resolution pair.
    #[must_use]
    pub fn new(symbol: impl Into<String>, resolution: impl Into<Resolution>) -> Self {
        Self {
            symbol: symbol.into(),
            resolution: resolution.into(),
        }
    }
}

impl std::fmt::Display for LastBarKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.symbol, self.resolution)
    }
}

// =============================================================================
// Tests
// =============================================================================
