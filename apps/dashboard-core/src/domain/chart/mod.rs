//! Chart Feed Domain
//!
//! Bridges the charting widget's subscription callbacks with streamed
//! bar updates: bar value types, the per-symbol/resolution last-bar
//! cache, and the per-channel subscription registry.

/// Bar, resolution, and cache key value types.
pub mod bar;

/// Last-seen bar per symbol/resolution pair.
pub mod last_bars;

/// Active chart subscriptions and bar dispatch.
pub mod subscriptions;
