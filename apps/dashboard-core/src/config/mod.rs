//! Display Configuration
//!
//! The allow-list of markets the dashboard is willing to show, and the
//! test flag that bypasses it. Loaded from environment variables with
//! compiled-in defaults.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::markets::types::MarketId;

/// Markets shown by default when no override is configured.
pub const DEFAULT_MARKETS_TO_DISPLAY: &[&str] = &[
    "BTC-USD",
    "ETH-USD",
    "SOL-USD",
    "AVAX-USD",
    "LINK-USD",
    "MATIC-USD",
    "DOGE-USD",
    "UNI-USD",
    "AAVE-USD",
    "ATOM-USD",
    "DOT-USD",
    "LTC-USD",
    "XRP-USD",
];

/// Configuration error for display settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable has an unparseable value.
    #[error("environment variable {var} has invalid value: {value}")]
    InvalidValue {
        /// Variable name.
        var: String,
        /// The offending value.
        value: String,
    },
}

/// Which markets the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Allow-list of displayable market ids.
    markets_to_display: HashSet<MarketId>,
    /// Test flag: when set, every market is displayable and the
    /// allow-list is ignored.
    display_all_markets: bool,
}

impl DisplaySettings {
    /// Create settings from an explicit allow-list and bypass flag.
    pub fn new(
        markets_to_display: impl IntoIterator<Item = MarketId>,
        display_all_markets: bool,
    ) -> Self {
        Self {
            markets_to_display: markets_to_display.into_iter().collect(),
            display_all_markets,
        }
    }

    /// Load settings from environment variables.
    ///
    /// - `DASHBOARD_MARKETS`: comma-separated allow-list override.
    /// - `DASHBOARD_DISPLAY_ALL_MARKETS`: boolean bypass flag.
    ///
    /// Unset variables fall back to the compiled-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but empty or not
    /// parseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let markets_to_display = match std::env::var("DASHBOARD_MARKETS") {
            Ok(value) => parse_market_list("DASHBOARD_MARKETS", &value)?,
            Err(_) => DEFAULT_MARKETS_TO_DISPLAY
                .iter()
                .map(ToString::to_string)
                .collect(),
        };

        let display_all_markets = match std::env::var("DASHBOARD_DISPLAY_ALL_MARKETS") {
            Ok(value) => parse_bool("DASHBOARD_DISPLAY_ALL_MARKETS", &value)?,
            Err(_) => false,
        };

        Ok(Self {
            markets_to_display,
            display_all_markets,
        })
    }

    /// Check whether a market id may be shown.
    ///
    /// Always true when the display-all bypass flag is set.
    #[must_use]
    pub fn is_displayable(&self, market_id: &str) -> bool {
        self.display_all_markets || self.markets_to_display.contains(market_id)
    }

    /// Whether the allow-list bypass is active.
    #[must_use]
    pub const fn display_all_markets(&self) -> bool {
        self.display_all_markets
    }

    /// Number of allow-listed markets.
    #[must_use]
    pub fn allow_list_len(&self) -> usize {
        self.markets_to_display.len()
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_MARKETS_TO_DISPLAY.iter().map(ToString::to_string),
            false,
        )
    }
}

/// Parse a comma-separated market id list.
fn parse_market_list(var: &str, value: &str) -> Result<HashSet<MarketId>, ConfigError> {
    let ids: HashSet<MarketId> = value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect();

    if ids.is_empty() {
        return Err(ConfigError::EmptyValue(var.to_string()));
    }
    Ok(ids)
}

/// Parse a boolean environment value ("true"/"false"/"1"/"0").
fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================
