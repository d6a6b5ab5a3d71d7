//! Market View Derivation
//!
//! Joins the external store's market and asset snapshots into the rows
//! the markets screen renders, applies the category filter, the
//! displayable-markets allow-list, and the optional text search, and
//! derives which category filters are present in the data.
//!
//! Derivation is a pure function of its inputs. [`MarketViewSelector`]
//! memoizes it: the external store hands out immutable `Arc` snapshots,
//! so a cache hit is pointer identity on both snapshots plus value
//! equality on the filter and search string. Re-render-driven
//! recomputation under unchanged inputs is therefore a clone of a
//! shared `Arc`, not a recompute.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::filter::MarketFilter;
use super::types::{Asset, AssetId, MarketData, MarketId, PerpetualMarket};
use crate::config::DisplaySettings;

/// Snapshot of the external market store: market id to raw record.
pub type MarketMap = HashMap<MarketId, PerpetualMarket>;

/// Snapshot of the external asset store: asset id to asset record.
pub type AssetMap = HashMap<AssetId, Asset>;

// =============================================================================
// View
// =============================================================================

/// The derived market view consumed by the markets screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketView {
    /// Every market joined with its asset and flattened, in the
    /// iteration order of the source snapshot (order not semantically
    /// significant).
    pub markets: Vec<MarketData>,
    /// `markets` restricted to the category predicate, the allow-list
    /// (unless bypassed), and the search string when one is set.
    pub filtered_markets: Vec<MarketData>,
    /// `All` followed by every category carried by at least one
    /// market's tags, in fixed enumeration order, without duplicates.
    pub market_filters: Vec<MarketFilter>,
}

/// Derive the market view from store snapshots.
///
/// Pure: never mutates its inputs, safe and idempotent to re-invoke.
/// An empty search string is treated as no search.
#[must_use]
pub fn derive_market_view(
    market_map: &MarketMap,
    asset_map: &AssetMap,
    filter: MarketFilter,
    search: Option<&str>,
    display: &DisplaySettings,
) -> MarketView {
    let markets: Vec<MarketData> = market_map
        .values()
        .map(|market| MarketData::from_market(market, asset_map.get(&market.asset_id)))
        .collect();

    let mut filtered_markets: Vec<MarketData> = markets
        .iter()
        .filter(|market| filter.matches(market))
        .filter(|market| display.is_displayable(&market.id))
        .cloned()
        .collect();

    if let Some(search) = search.filter(|s| !s.is_empty()) {
        filtered_markets.retain(|market| market.matches_search(search));
    }

    let market_filters: Vec<MarketFilter> = MarketFilter::ALL
        .iter()
        .copied()
        .filter(|candidate| match candidate.tag() {
            None => true,
            Some(tag) => markets.iter().any(|market| market.asset_has_tag(tag)),
        })
        .collect();

    debug!(
        markets = markets.len(),
        filtered = filtered_markets.len(),
        %filter,
        "derived market view"
    );

    MarketView {
        markets,
        filtered_markets,
        market_filters,
    }
}

// =============================================================================
// Memoizing Selector
// =============================================================================

/// Inputs and output of the last derivation.
struct CachedView {
    market_map: Arc<MarketMap>,
    asset_map: Arc<AssetMap>,
    filter: MarketFilter,
    search: Option<String>,
    view: Arc<MarketView>,
}

/// Memoizing wrapper around [`derive_market_view`].
///
/// Holds the displayable-markets settings captured at construction and
/// the last derivation. Single-threaded by design: owned by the UI
/// layer and driven from the event loop, no interior locking.
pub struct MarketViewSelector {
    display: DisplaySettings,
    cached: Option<CachedView>,
}

impl MarketViewSelector {
    /// Create a selector with the given display settings.
    #[must_use]
    pub const fn new(display: DisplaySettings) -> Self {
        Self {
            display,
            cached: None,
        }
    }

    /// The display settings this selector was built with.
    #[must_use]
    pub const fn display_settings(&self) -> &DisplaySettings {
        &self.display
    }

    /// Derive the market view, reusing the cached result when both
    /// snapshots are pointer-identical and filter/search are unchanged.
    pub fn select(
        &mut self,
        market_map: &Arc<MarketMap>,
        asset_map: &Arc<AssetMap>,
        filter: MarketFilter,
        search: Option<&str>,
    ) -> Arc<MarketView> {
        if let Some(cached) = &self.cached
            && Arc::ptr_eq(&cached.market_map, market_map)
            && Arc::ptr_eq(&cached.asset_map, asset_map)
            && cached.filter == filter
            && cached.search.as_deref() == search
        {
            trace!("market view cache hit");
            return Arc::clone(&cached.view);
        }

        let view = Arc::new(derive_market_view(
            market_map,
            asset_map,
            filter,
            search,
            &self.display,
        ));

        self.cached = Some(CachedView {
            market_map: Arc::clone(market_map),
            asset_map: Arc::clone(asset_map),
            filter,
            search: search.map(str::to_string),
            view: Arc::clone(&view),
        });

        view
    }
}

// =============================================================================
// Tests
// =============================================================================
