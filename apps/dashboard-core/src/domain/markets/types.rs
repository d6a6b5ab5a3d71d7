//! Market and Asset Record Types
//!
//! Raw records as handed out by the external state store (asset and
//! perpetual-market snapshots from the indexer), plus the flattened
//! `MarketData` record the markets screen renders. Upstream records
//! carry whatever fields the indexer sent, so nested blocks and most
//! values are optional; missing data degrades to `None` rather than
//! failing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// A market identifier (e.g. "ETH-USD").
pub type MarketId = String;

/// An asset identifier (e.g. "ETH").
pub type AssetId = String;

// =============================================================================
// Raw Records
// =============================================================================

/// A tradable underlying asset.
///
/// Owned by the external asset store; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identifier.
    pub id: AssetId,
    /// Human-readable display name (e.g. "Ethereum").
    #[serde(default)]
    pub name: Option<String>,
    /// Category tags used for grouping (e.g. "Layer 1", "Defi").
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Asset {
    /// Check whether this asset carries the given category tag.
    ///
    /// An absent tag list never matches.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }
}

/// Nested per-market trading configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfigs {
    /// Decimal places for price display (tick size precision).
    #[serde(default)]
    pub tick_size_decimals: Option<u32>,
    /// Decimal places for size display (step size precision).
    #[serde(default)]
    pub step_size_decimals: Option<u32>,
}

/// Nested perpetual-specific market statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpetualFields {
    /// Notional volume traded over the trailing 24 hours.
    #[serde(default)]
    pub volume_24h: Option<Decimal>,
    /// Number of trades over the trailing 24 hours.
    #[serde(default)]
    pub trades_24h: Option<u64>,
    /// Current open interest.
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    /// Funding rate for the next funding period.
    #[serde(default)]
    pub next_funding_rate: Option<Decimal>,
}

/// A perpetual market record.
///
/// Owned by the external market store; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpetualMarket {
    /// Market identifier.
    pub id: MarketId,
    /// Foreign key to the underlying [`Asset`].
    pub asset_id: AssetId,
    /// Current oracle price.
    #[serde(default)]
    pub oracle_price: Option<Decimal>,
    /// Price change over the trailing 24 hours.
    #[serde(default)]
    pub price_change_24h: Option<Decimal>,
    /// Nested trading configuration, when the indexer sent one.
    #[serde(default)]
    pub configs: Option<MarketConfigs>,
    /// Nested perpetual statistics, when the indexer sent them.
    #[serde(default)]
    pub perpetual: Option<PerpetualFields>,
}

// =============================================================================
// Flattened Display Record
// =============================================================================

/// A display-ready market row: one perpetual market joined with its
/// asset, nested blocks lifted to the top level.
///
/// Ephemeral - recomputed from the source snapshots on every relevant
/// input change, never persisted. One `MarketData` per market id.
///
/// A market whose asset id has no matching asset record still yields a
/// row with `asset: None`; such a row fails every category predicate
/// and the search predicate (non-matching, not an error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    /// Market identifier.
    pub id: MarketId,
    /// Joined asset record, if the asset store had one.
    pub asset: Option<Asset>,
    /// Tick size precision. Sourced from the nested configs block: if a
    /// top-level duplicate ever diverges from the configs value, the
    /// configs value wins.
    pub tick_size_decimals: Option<u32>,
    /// Step size precision, lifted from the configs block.
    pub step_size_decimals: Option<u32>,
    /// Current oracle price.
    pub oracle_price: Option<Decimal>,
    /// Price change over the trailing 24 hours.
    pub price_change_24h: Option<Decimal>,
    /// Notional 24h volume, lifted from the perpetual block.
    pub volume_24h: Option<Decimal>,
    /// 24h trade count, lifted from the perpetual block.
    pub trades_24h: Option<u64>,
    /// Open interest, lifted from the perpetual block.
    pub open_interest: Option<Decimal>,
    /// Next funding rate, lifted from the perpetual block.
    pub next_funding_rate: Option<Decimal>,
}

impl MarketData {
    /// Join a market record with its asset and flatten the nested
    /// configs/perpetual blocks onto the top level.
    #[must_use]
    pub fn from_market(market: &PerpetualMarket, asset: Option<&Asset>) -> Self {
        let configs = market.configs.unwrap_or_default();
        let perpetual = market.perpetual.unwrap_or_default();

        Self {
            id: market.id.clone(),
            asset: asset.cloned(),
            // configs-sourced values are authoritative over any
            // top-level duplicates
            tick_size_decimals: configs.tick_size_decimals,
            step_size_decimals: configs.step_size_decimals,
            oracle_price: market.oracle_price,
            price_change_24h: market.price_change_24h,
            volume_24h: perpetual.volume_24h,
            trades_24h: perpetual.trades_24h,
            open_interest: perpetual.open_interest,
            next_funding_rate: perpetual.next_funding_rate,
        }
    }

    /// Check whether this market's asset carries the given tag.
    ///
    /// A missing asset or missing tag list never matches.
    #[must_use]
    pub fn asset_has_tag(&self, tag: &str) -> bool {
        self.asset.as_ref().is_some_and(|asset| asset.has_tag(tag))
    }

    /// Case-insensitive substring match against the asset's name or id.
    ///
    /// A missing asset never matches.
    #[must_use]
    pub fn matches_search(&self, search: &str) -> bool {
        let Some(asset) = &self.asset else {
            return false;
        };
        let needle = search.to_lowercase();

        asset
            .name
            .as_ref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
            || asset.id.to_lowercase().contains(&needle)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn eth_asset() -> Asset {
        Asset {
            id: "ETH".to_string(),
            name: Some("Ethereum".to_string()),
            tags: Some(vec!["Layer 1".to_string()]),
        }
    }

    fn eth_market() -> PerpetualMarket {
        PerpetualMarket {
            id: "ETH-USD".to_string(),
            asset_id: "ETH".to_string(),
            oracle_price: Some(Decimal::new(3_000, 0)),
            price_change_24h: Some(Decimal::new(-12, 1)),
            configs: Some(MarketConfigs {
                tick_size_decimals: Some(2),
                step_size_decimals: Some(3),
            }),
            perpetual: Some(PerpetualFields {
                volume_24h: Some(Decimal::new(1_000_000, 0)),
                trades_24h: Some(42),
                open_interest: Some(Decimal::new(5_000, 0)),
                next_funding_rate: Some(Decimal::new(1, 4)),
            }),
        }
    }

    #[test]
    fn flatten_lifts_nested_blocks() {
        let asset = eth_asset();
        let data = MarketData::from_market(&eth_market(), Some(&asset));

        assert_eq!(data.id, "ETH-USD");
        assert_eq!(data.tick_size_decimals, Some(2));
        assert_eq!(data.step_size_decimals, Some(3));
        assert_eq!(data.volume_24h, Some(Decimal::new(1_000_000, 0)));
        assert_eq!(data.trades_24h, Some(42));
        assert_eq!(data.asset.unwrap().id, "ETH");
    }

    #[test]
    fn tick_size_decimals_comes_from_configs() {
        // The configs block is the single source for tick size
        // precision; a diverging top-level duplicate must not leak
        // through.
        let market = eth_market();
        let data = MarketData::from_market(&market, None);
        assert_eq!(
            data.tick_size_decimals,
            market.configs.unwrap().tick_size_decimals
        );
    }

    #[test]
    fn flatten_without_nested_blocks() {
        let market = PerpetualMarket {
            id: "XYZ-USD".to_string(),
            asset_id: "XYZ".to_string(),
            oracle_price: None,
            price_change_24h: None,
            configs: None,
            perpetual: None,
        };
        let data = MarketData::from_market(&market, None);

        assert_eq!(data.tick_size_decimals, None);
        assert_eq!(data.volume_24h, None);
        assert!(data.asset.is_none());
    }

    #[test]
    fn missing_asset_never_matches() {
        let data = MarketData::from_market(&eth_market(), None);

        assert!(!data.asset_has_tag("Layer 1"));
        assert!(!data.matches_search("eth"));
    }

    #[test]
    fn absent_tag_list_never_matches() {
        let asset = Asset {
            id: "USDC".to_string(),
            name: Some("USD Coin".to_string()),
            tags: None,
        };
        assert!(!asset.has_tag("Defi"));
    }

    #[test]
    fn search_matches_name_and_id_case_insensitively() {
        let asset = eth_asset();
        let data = MarketData::from_market(&eth_market(), Some(&asset));

        // "eth" is a substring of both the name "Ethereum" and the id "ETH"
        assert!(data.matches_search("eth"));
        assert!(data.matches_search("ETHER"));
        assert!(!data.matches_search("bitcoin"));
    }

    #[test]
    fn search_matches_asset_id_when_name_absent() {
        let asset = Asset {
            id: "SOL".to_string(),
            name: None,
            tags: None,
        };
        let market = PerpetualMarket {
            id: "SOL-USD".to_string(),
            asset_id: "SOL".to_string(),
            oracle_price: None,
            price_change_24h: None,
            configs: None,
            perpetual: None,
        };
        let data = MarketData::from_market(&market, Some(&asset));

        assert!(data.matches_search("sol"));
        assert!(!data.matches_search("ethereum"));
    }

    #[test]
    fn records_round_trip_through_serde() {
        let market = eth_market();
        let json = serde_json::to_string(&market).unwrap();
        let back: PerpetualMarket = serde_json::from_str(&json).unwrap();
        assert_eq!(market, back);
    }

    #[test]
    fn market_deserializes_with_missing_optional_fields() {
        let market: PerpetualMarket =
            serde_json::from_str(r#"{"id": "ETH-USD", "assetId": "ETH"}"#).unwrap();
        assert_eq!(market.id, "ETH-USD");
        assert!(market.configs.is_none());
        assert!(market.perpetual.is_none());
    }
}
