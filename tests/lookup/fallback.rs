//! Partial-reading search and the lookup fallback built on it.

use super::common::{core_store, import, record, terms, uncached_matcher};
use lexmatch::MemoryStore;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn hiragana_query_falls_back_to_katakana_headword() {
    let store = core_store().await;
    // No headword starts with "は", but ハロー is filed under its reading
    let results = uncached_matcher(&store).lookup("はろー").await.unwrap();
    assert_eq!(terms(&results), vec!["ハロー"]);
}

#[tokio::test]
async fn fallback_accepts_readings_related_by_prefix() {
    let store = MemoryStore::new();
    import(
        Arc::new(store.clone()),
        "D",
        &json!([
            record("パン", "ぱん", 3),
            record("パンダ", "ぱんだ", 9),
            record("パンチ", "ぱんち", 5),
        ]),
    )
    .await;

    // "ぱんだ" equals one reading and extends "ぱん"; "ぱんち" is unrelated
    let results = uncached_matcher(&store).lookup("ぱんだ").await.unwrap();
    assert_eq!(terms(&results), vec!["パンダ", "パン"]);
}

#[tokio::test]
async fn single_character_queries_have_no_fallback() {
    let store = core_store().await;
    assert!(uncached_matcher(&store).lookup("は").await.unwrap().is_empty());
}

#[tokio::test]
async fn partial_reading_scores_shared_prefix() {
    let store = core_store().await;
    let matcher = uncached_matcher(&store);

    let found = matcher
        .search_by_partial_reading("D", "タベモノ", 2)
        .await
        .unwrap();
    let scored: Vec<(&str, u64)> = found.iter().map(|(e, s)| (e.term.as_str(), *s)).collect();
    assert_eq!(scored, vec![("食べ物", 4004), ("食べる", 2004)]);

    assert!(matcher
        .search_by_partial_reading("missing", "たべもの", 2)
        .await
        .unwrap()
        .is_empty());
}
