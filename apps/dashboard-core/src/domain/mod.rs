//! Domain Layer - Market view derivation and chart feed caching.
//!
//! Pure in-memory computation and map access: no I/O, no async, no
//! shared-state locking. Stores are owned values mutated on the UI
//! event loop.

/// Market records, category filtering, and the memoized view selector.
pub mod markets;

/// Bar types, the last-bar cache, and the subscription registry.
pub mod chart;
