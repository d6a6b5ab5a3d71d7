#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Dashboard Core - Market View & Chart Feed Cache
//!
//! Library backing the trading dashboard's markets screen and its
//! charting-widget integration. Two independent components:
//!
//! - **Market view selection**: joins the external store's asset and
//!   perpetual-market snapshots into flattened display rows, applies a
//!   closed-set category filter, the displayable-markets allow-list, and
//!   an optional case-insensitive search, and derives which category
//!   filters are actually present in the data. Memoized per input
//!   snapshot so re-render-driven recomputation is cheap.
//!
//! - **Chart feed caching**: a last-bar cache keyed by symbol/resolution
//!   and a subscription registry keyed by channel id, bridging the
//!   charting widget's subscribe/unsubscribe callbacks with streamed
//!   bar updates from the real-time feed.
//!
//! No data flows between the two components. Both are plain owned values
//! mutated on the UI event loop; neither performs I/O.
//!
//! # Data Flow
//!
//! ```text
//! Asset store ──┐
//!               ├──► MarketViewSelector ──► {markets, filtered, filters} ──► UI
//! Market store ─┘
//!
//! Real-time feed ──► SubscriptionRegistry::dispatch ──► chart callbacks
//!                    LastBarCache (seed for late subscribers)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Market view derivation and chart feed caching.
pub mod domain;

/// Configuration - Displayable-markets allow-list and test flags.
pub mod config;

// =============================================================================
// Re-exports
// =============================================================================

// Market view
pub use domain::markets::filter::MarketFilter;
pub use domain::markets::types::{
    Asset, AssetId, MarketConfigs, MarketData, MarketId, PerpetualFields, PerpetualMarket,
};
pub use domain::markets::view::{AssetMap, MarketMap, MarketView, MarketViewSelector};

// Chart feed
pub use domain::chart::bar::{Bar, LastBarKey, Resolution};
pub use domain::chart::last_bars::LastBarCache;
pub use domain::chart::subscriptions::{
    BarCallback, ChannelId, HandlerId, SubscribeId, SubscriptionRegistry,
};

// Configuration
pub use config::{ConfigError, DisplaySettings};
