//! Shared test utilities and fixtures.

#![allow(dead_code)]

use lexmatch::{
    DictionaryMetadata, EngineConfig, Entry, Importer, KeyValueStore, ManualClock, MemoryStore,
    TermMatcher,
};
use serde_json::{json, Value};
use std::sync::Arc;

// ============================================================================
// RECORDS
// ============================================================================

/// An 8-field import record with one plain definition.
pub fn record(term: &str, reading: &str, score: i64) -> Value {
    json!([term, reading, "", "", score, [format!("{} (gloss)", term)], 0, ""])
}

/// A small lexicon exercising every path through lookup.
pub fn core_lexicon() -> Value {
    json!([
        record("食べる", "たべる", 10),
        record("食べ物", "たべもの", 8),
        record("食", "しょく", 3),
        record("家", "いえ", 5),
        record("家持", "いえもち", 1),
        record("見る", "みる", 9),
        record("見", "み", 2),
        record("猫", "ねこ", 7),
        record("行く", "いく", 9),
        record("ハロー", "はろー", 4),
    ])
}

// ============================================================================
// STORES AND MATCHERS
// ============================================================================

/// Import `payload` into `dictionary` on `store`.
pub async fn import(store: Arc<dyn KeyValueStore>, dictionary: &str, payload: &Value) {
    let entries = lexmatch::EntryStore::new(store, lexmatch::config::DEFAULT_KEY_PREFIX);
    Importer::new(entries)
        .import_entries(
            dictionary,
            DictionaryMetadata::new(dictionary, "1"),
            payload,
            |_| {},
        )
        .await
        .expect("import failed");
}

/// A memory store holding [`core_lexicon`] as dictionary `D`.
pub async fn core_store() -> MemoryStore {
    let store = MemoryStore::new();
    import(Arc::new(store.clone()), "D", &core_lexicon()).await;
    store
}

/// A matcher over `store` with both caches disabled.
pub fn uncached_matcher(store: &MemoryStore) -> TermMatcher {
    TermMatcher::builder(Arc::new(store.clone()))
        .config(EngineConfig::uncached())
        .build()
}

/// A matcher over `store` with default caching and a hand-driven clock.
pub fn clocked_matcher(store: &MemoryStore) -> (TermMatcher, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let matcher = TermMatcher::builder(Arc::new(store.clone()))
        .clock(clock.clone())
        .build();
    (matcher, clock)
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Headwords in result order.
pub fn terms(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.term.as_str()).collect()
}

/// True if `entries` holds `(term, reading, dictionary)`.
pub fn contains(entries: &[Entry], term: &str, reading: &str, dictionary: &str) -> bool {
    entries
        .iter()
        .any(|e| e.term == term && e.reading == reading && e.dictionary == dictionary)
}
