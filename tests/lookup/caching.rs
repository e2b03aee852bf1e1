//! Result and bucket cache behaviour under a hand-driven clock.

use super::common::{clocked_matcher, core_store, import, record, terms};
use lexmatch::{EngineConfig, ManualClock, TermMatcher};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn repeated_lookup_is_served_from_result_cache() {
    let store = core_store().await;
    let (matcher, _clock) = clocked_matcher(&store);

    let first = matcher.lookup("猫").await.unwrap();
    let reads = store.read_count();
    let second = matcher.lookup("猫").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.read_count(), reads);
    assert_eq!(matcher.result_cache().len(), 1);
}

#[tokio::test]
async fn expired_results_are_recomputed() {
    let store = core_store().await;
    let (matcher, clock) = clocked_matcher(&store);

    let first = matcher.lookup("猫").await.unwrap();
    let reads = store.read_count();

    // Result cache (5 s) expired, bucket cache (10 s) still warm: only the index is re-read
    clock.advance(Duration::from_secs(6));
    let second = matcher.lookup("猫").await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(store.read_count(), reads + 1);

    // Both expired: index and bucket are re-read
    clock.advance(Duration::from_secs(5));
    matcher.lookup("猫").await.unwrap();
    assert_eq!(store.read_count(), reads + 3);
}

#[tokio::test]
async fn empty_results_are_cached_too() {
    let store = core_store().await;
    let (matcher, _clock) = clocked_matcher(&store);

    assert!(matcher.lookup("xyz").await.unwrap().is_empty());
    let reads = store.read_count();
    assert!(matcher.lookup("xyz").await.unwrap().is_empty());
    assert_eq!(store.read_count(), reads);
}

#[tokio::test]
async fn imports_become_visible_after_bucket_ttl() {
    let store = core_store().await;
    let (matcher, clock) = clocked_matcher(&store);
    assert_eq!(terms(&matcher.lookup("犬").await.unwrap()), Vec::<&str>::new());

    import(Arc::new(store.clone()), "D", &json!([record("犬", "いぬ", 1)])).await;

    // Stale empty bucket still cached
    clock.advance(Duration::from_secs(6));
    assert!(matcher.lookup("犬").await.unwrap().is_empty());

    clock.advance(Duration::from_secs(5));
    assert_eq!(terms(&matcher.lookup("犬").await.unwrap()), vec!["犬"]);
}

#[tokio::test]
async fn result_cache_evicts_oldest_query() {
    let store = core_store().await;
    let matcher = TermMatcher::builder(Arc::new(store.clone()))
        .config(EngineConfig {
            result_cache_capacity: 2,
            ..EngineConfig::default()
        })
        .clock(Arc::new(ManualClock::new()))
        .build();

    matcher.lookup("猫").await.unwrap();
    matcher.lookup("家").await.unwrap();
    matcher.lookup("見").await.unwrap();

    assert_eq!(matcher.result_cache().len(), 2);
    assert!(matcher.result_cache().get("猫").is_none());
    assert!(matcher.result_cache().get("見").is_some());
}

#[tokio::test]
async fn failed_lookup_leaves_caches_usable() {
    let store = core_store().await;
    let (matcher, _clock) = clocked_matcher(&store);

    store.set_failing(true);
    assert!(matcher.lookup("猫").await.is_err());
    assert!(matcher.result_cache().is_empty());

    store.set_failing(false);
    assert_eq!(terms(&matcher.lookup("猫").await.unwrap()), vec!["猫"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_lookups_agree_and_respect_capacity() {
    let store = core_store().await;
    let matcher = Arc::new(
        TermMatcher::builder(Arc::new(store.clone()))
            .config(EngineConfig {
                bucket_cache_capacity: 4,
                result_cache_capacity: 3,
                ..EngineConfig::default()
            })
            .clock(Arc::new(ManualClock::new()))
            .build(),
    );
    let spawn = |query: &'static str| {
        let matcher = Arc::clone(&matcher);
        tokio::spawn(async move { matcher.lookup(query).await })
    };

    let (a, b, c, d, e) = tokio::join!(
        spawn("食べます"),
        spawn("食べます"),
        spawn("食べ物が"),
        spawn("家持"),
        spawn("食べます"),
    );
    let a = a.unwrap().unwrap();
    let b = b.unwrap().unwrap();
    let e = e.unwrap().unwrap();
    assert_eq!(a, b);
    assert_eq!(a, e);
    assert_eq!(terms(&a), vec!["食べる"]);
    assert_eq!(terms(&c.unwrap().unwrap()), vec!["食べ物"]);
    assert_eq!(terms(&d.unwrap().unwrap()), vec!["家持", "家"]);

    assert_eq!(matcher.result_cache().len(), 3);
    assert!(matcher.bucket_cache().len() <= 4);

    // Whichever duplicate wrote last, the cached value is complete
    let reads = store.read_count();
    assert_eq!(matcher.lookup("食べます").await.unwrap(), a);
    assert_eq!(store.read_count(), reads);
}
