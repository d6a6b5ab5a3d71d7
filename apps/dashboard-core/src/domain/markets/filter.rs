//! Market Category Filters
//!
//! Closed set of category filters for the markets screen. The predicate
//! is an exhaustive match over the enum, so adding a variant forces the
//! dispatch to be extended at compile time.

use serde::{Deserialize, Serialize};

use super::types::MarketData;

/// Category filter for the markets screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketFilter {
    /// Show every market.
    #[default]
    All,
    /// Layer 1 base-chain assets.
    #[serde(rename = "LAYER_1")]
    Layer1,
    /// DeFi protocol assets.
    Defi,
}

impl MarketFilter {
    /// All filters, in fixed display order. Derived filter lists always
    /// follow this order, not discovery order.
    pub const ALL: &'static [Self] = &[Self::All, Self::Layer1, Self::Defi];

    /// Human-readable label for filter buttons.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Layer1 => "Layer 1",
            Self::Defi => "Defi",
        }
    }

    /// The asset tag this filter matches against, if any.
    ///
    /// `All` matches unconditionally and has no tag.
    #[must_use]
    pub const fn tag(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Layer1 => Some("Layer 1"),
            Self::Defi => Some("Defi"),
        }
    }

    /// Category predicate for a flattened market row.
    ///
    /// `All` is always true; any other filter is true iff the market's
    /// asset tag list contains the filter's tag. A missing asset or
    /// missing tag list is non-matching, never an error.
    #[must_use]
    pub fn matches(&self, market: &MarketData) -> bool {
        match self.tag() {
            None => true,
            Some(tag) => market.asset_has_tag(tag),
        }
    }
}

impl std::fmt::Display for MarketFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Tests
// =============================================================================
