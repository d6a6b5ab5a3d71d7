//! Chart Feed Integration Tests
//!
//! Exercises the charting-widget bridge end to end: seed the last-bar
//! cache from history, subscribe chart components, stream bars through
//! dispatch, and tear handlers down on unmount.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use dashboard_core::{Bar, LastBarCache, LastBarKey, Resolution, SubscriptionRegistry};

fn bar(minute: u32, close: i64) -> Bar {
    Bar {
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap(),
        open: Decimal::new(close - 5, 0),
        high: Decimal::new(close + 5, 0),
        low: Decimal::new(close - 10, 0),
        close: Decimal::new(close, 0),
        volume: Some(Decimal::new(500, 0)),
    }
}

#[test]
fn subscribe_stream_unsubscribe_lifecycle() {
    let mut last_bars = LastBarCache::new();
    let mut registry = SubscriptionRegistry::new();

    // history fetch completes and seeds the last-bar cache
    let key = LastBarKey::new("ETH-USD", "1");
    last_bars.insert(key.clone(), bar(0, 100));

    // first chart component subscribes, seeded from the cache
    let seed = last_bars.get(&key).cloned();
    let channel = "ETH-USD/1";
    let h1 = registry.register(channel, "uid-1", Resolution::new("1"), seed);
    let first_seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&first_seen);
        registry.add_handler(
            channel,
            h1,
            Box::new(move |b: &Bar| seen.borrow_mut().push(b.close)),
        );
    }
    assert_eq!(
        registry.last_bar(channel).map(|b| b.close),
        Some(Decimal::new(100, 0))
    );

    // a second component mounts on the same channel
    let h2 = registry.register(channel, "uid-2", Resolution::new("1"), None);
    let second_seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&second_seen);
        registry.add_handler(
            channel,
            h2,
            Box::new(move |b: &Bar| seen.borrow_mut().push(b.close)),
        );
    }

    // two bars stream in; both also refresh the last-bar cache
    for (minute, close) in [(1, 101), (2, 103)] {
        let update = bar(minute, close);
        last_bars.insert(key.clone(), update.clone());
        let invoked = registry.dispatch(channel, &update);
        assert_eq!(invoked, 2);
    }

    assert_eq!(
        *first_seen.borrow(),
        vec![Decimal::new(101, 0), Decimal::new(103, 0)]
    );
    assert_eq!(*second_seen.borrow(), *first_seen.borrow());
    assert_eq!(
        registry.last_bar(channel).map(|b| b.close),
        Some(Decimal::new(103, 0))
    );

    // first component unmounts; the stream keeps flowing to the second
    assert!(!registry.remove_handler(channel, h1));
    registry.dispatch(channel, &bar(3, 99));
    assert_eq!(first_seen.borrow().len(), 2);
    assert_eq!(second_seen.borrow().len(), 3);

    // last component unmounts; the channel entry is gone
    assert!(registry.remove_handler(channel, h2));
    assert!(!registry.contains_channel(channel));
    assert_eq!(registry.dispatch(channel, &bar(4, 98)), 0);

    // the last-bar cache outlives the subscription
    assert_eq!(
        last_bars.get(&key).map(|b| b.close),
        Some(Decimal::new(103, 0))
    );
}

#[test]
fn cache_and_registry_are_independent_per_resolution() {
    let mut last_bars = LastBarCache::new();
    let mut registry = SubscriptionRegistry::new();

    last_bars.insert(LastBarKey::new("ETH-USD", "1"), bar(0, 100));
    last_bars.insert(LastBarKey::new("ETH-USD", "1D"), bar(0, 90));

    let minute_seen = Rc::new(RefCell::new(Vec::new()));
    let h = registry.register("ETH-USD/1", "uid-1", Resolution::new("1"), None);
    {
        let seen = Rc::clone(&minute_seen);
        registry.add_handler(
            "ETH-USD/1",
            h,
            Box::new(move |b: &Bar| seen.borrow_mut().push(b.close)),
        );
    }
    registry.register("ETH-USD/1D", "uid-2", Resolution::new("1D"), None);

    registry.dispatch("ETH-USD/1", &bar(1, 105));

    // only the minute channel saw the update
    assert_eq!(minute_seen.borrow().len(), 1);
    assert!(registry.last_bar("ETH-USD/1D").is_none());

    // cache entries stay distinct per resolution
    assert_eq!(
        last_bars.get(&LastBarKey::new("ETH-USD", "1")).unwrap().close,
        Decimal::new(100, 0)
    );
    assert_eq!(
        last_bars.get(&LastBarKey::new("ETH-USD", "1D")).unwrap().close,
        Decimal::new(90, 0)
    );
}

#[test]
fn resubscribing_after_teardown_starts_fresh() {
    let mut registry = SubscriptionRegistry::new();
    let channel = "BTC-USD/60";

    let h = registry.register(channel, "uid-1", Resolution::new("60"), Some(bar(0, 100)));
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let captured = Rc::clone(&seen);
        registry.add_handler(
            channel,
            h,
            Box::new(move |b: &Bar| captured.borrow_mut().push(b.close)),
        );
    }
    registry.dispatch(channel, &bar(1, 110));
    assert!(registry.remove_handler(channel, h));

    // fresh registration required before further dispatch reaches anyone
    let h2 = registry.register(channel, "uid-9", Resolution::new("60"), None);
    assert_eq!(registry.subscribe_id(channel), Some("uid-9"));
    assert!(registry.last_bar(channel).is_none());

    let seen2 = Rc::new(RefCell::new(Vec::new()));
    {
        let captured = Rc::clone(&seen2);
        registry.add_handler(
            channel,
            h2,
            Box::new(move |b: &Bar| captured.borrow_mut().push(b.close)),
        );
    }
    assert_eq!(registry.dispatch(channel, &bar(2, 120)), 1);
    assert_eq!(*seen2.borrow(), vec![Decimal::new(120, 0)]);
    // the old handler never fires again
    assert_eq!(seen.borrow().len(), 1);
}
