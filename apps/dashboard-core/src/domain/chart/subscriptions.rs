//! Chart Subscription Registry
//!
//! Tracks which chart components are listening to which bar stream, so
//! that bar updates arriving from the real-time feed can be routed to
//! the right callbacks. One channel covers one symbol/resolution
//! stream; a channel carries one or more handlers (one per mounted
//! chart component). When a component unmounts it removes its handler,
//! and the channel entry is dropped once the last handler is gone.
//!
//! Explicitly constructed and owned by the charting integration, not a
//! process global. All mutation happens on the UI event loop; callback
//! de-registration is the only cancellation primitive and takes effect
//! immediately.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::bar::{Bar, Resolution};

// =============================================================================
// Types
// =============================================================================

/// A charting-library channel id identifying one symbol/resolution
/// stream (e.g. "ETH-USD/1D").
pub type ChannelId = String;

/// The subscribing client's unique id, assigned by the charting widget.
pub type SubscribeId = String;

/// Callback invoked with every bar dispatched to a channel.
pub type BarCallback = Box<dyn FnMut(&Bar)>;

/// Identifier for one registered handler on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// State for one active channel.
struct ChannelSubscription {
    subscribe_id: SubscribeId,
    resolution: Resolution,
    last_bar: Option<Bar>,
    handlers: HashMap<HandlerId, BarCallback>,
}

// =============================================================================
// Registry
// =============================================================================

/// Active chart subscriptions, keyed by channel id.
#[derive(Default)]
pub struct SubscriptionRegistry {
    channels: HashMap<ChannelId, ChannelSubscription>,
    next_handler_id: u64,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a channel entry exists and issue a fresh handler id.
    ///
    /// When the channel is already registered, the existing entry (its
    /// subscribe id, resolution, and last bar) is kept and only a new
    /// handler id is issued. Pass the id to [`Self::add_handler`] to
    /// attach the callback.
    pub fn register(
        &mut self,
        channel_id: impl Into<ChannelId>,
        subscribe_id: impl Into<SubscribeId>,
        resolution: Resolution,
        initial_last_bar: Option<Bar>,
    ) -> HandlerId {
        let channel_id = channel_id.into();

        self.channels
            .entry(channel_id.clone())
            .or_insert_with(|| ChannelSubscription {
                subscribe_id: subscribe_id.into(),
                resolution,
                last_bar: initial_last_bar,
                handlers: HashMap::new(),
            });

        self.next_handler_id += 1;
        let handler = HandlerId(self.next_handler_id);

        debug!(channel = %channel_id, handler = handler.0, "registered chart subscription");
        handler
    }

    /// Attach a callback under a handler id issued by [`Self::register`].
    ///
    /// Silently ignored when the channel is unknown.
    pub fn add_handler(&mut self, channel_id: &str, handler: HandlerId, callback: BarCallback) {
        match self.channels.get_mut(channel_id) {
            Some(channel) => {
                channel.handlers.insert(handler, callback);
            }
            None => trace!(channel = channel_id, "add_handler on unknown channel"),
        }
    }

    /// Detach a handler from a channel.
    ///
    /// Returns `true` when this was the channel's last handler and the
    /// whole entry was dropped - the caller should then stop the
    /// upstream stream for the channel.
    pub fn remove_handler(&mut self, channel_id: &str, handler: HandlerId) -> bool {
        let Some(channel) = self.channels.get_mut(channel_id) else {
            return false;
        };
        channel.handlers.remove(&handler);

        if channel.handlers.is_empty() {
            self.channels.remove(channel_id);
            debug!(channel = channel_id, "last handler removed, channel dropped");
            return true;
        }
        false
    }

    /// Route a streamed bar to a channel.
    ///
    /// Updates the channel's stored last bar, then synchronously
    /// invokes every registered callback with the bar. Invocation
    /// order is unspecified (the backing map is unordered). Returns
    /// the number of callbacks invoked; an unknown channel is 0, not
    /// an error.
    pub fn dispatch(&mut self, channel_id: &str, bar: &Bar) -> usize {
        let Some(channel) = self.channels.get_mut(channel_id) else {
            trace!(channel = channel_id, "dispatch on unknown channel");
            return 0;
        };

        channel.last_bar = Some(bar.clone());
        for callback in channel.handlers.values_mut() {
            callback(bar);
        }

        trace!(
            channel = channel_id,
            handlers = channel.handlers.len(),
            "dispatched bar"
        );
        channel.handlers.len()
    }

    /// Check whether a channel is registered.
    #[must_use]
    pub fn contains_channel(&self, channel_id: &str) -> bool {
        self.channels.contains_key(channel_id)
    }

    /// Number of handlers attached to a channel (0 when unknown).
    #[must_use]
    pub fn handler_count(&self, channel_id: &str) -> usize {
        self.channels
            .get(channel_id)
            .map_or(0, |channel| channel.handlers.len())
    }

    /// The last bar dispatched to (or registered with) a channel.
    #[must_use]
    pub fn last_bar(&self, channel_id: &str) -> Option<&Bar> {
        self.channels
            .get(channel_id)
            .and_then(|channel| channel.last_bar.as_ref())
    }

    /// The resolution a channel was registered with.
    #[must_use]
    pub fn resolution(&self, channel_id: &str) -> Option<&Resolution> {
        self.channels
            .get(channel_id)
            .map(|channel| &channel.resolution)
    }

    /// The subscribe id a channel was registered with.
    #[must_use]
    pub fn subscribe_id(&self, channel_id: &str) -> Option<&str> {
        self.channels
            .get(channel_id)
            .map(|channel| channel.subscribe_id.as_str())
    }

    /// Number of active channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl std::fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers: usize = self.channels.values().map(|c| c.handlers.len()).sum();
        f.debug_struct("SubscriptionRegistry")
            .field("channels", &self.channels.len())
            .field("handlers", &handlers)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
