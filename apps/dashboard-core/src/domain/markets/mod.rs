//! Market View Domain
//!
//! Raw market/asset records, the flattened display record, the
//! closed-set category filter, and the memoized view selector.

/// Raw records and the flattened `MarketData` join.
pub mod types;

/// Closed-set category filter and its predicates.
pub mod filter;

/// View derivation and memoizing selector.
pub mod view;
