//! Ordering guarantees of lookup results.

use super::common::{core_store, import, record, terms, uncached_matcher};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn longer_exact_match_outranks_higher_score() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("家持").await.unwrap();
    // 家 scores 5, 家持 scores 1; length wins
    assert_eq!(terms(&results), vec!["家持", "家"]);
}

#[tokio::test]
async fn exact_match_precedes_prefix_match_at_same_length() {
    let store = core_store().await;
    import(Arc::new(store.clone()), "E", &json!([record("家持", "いえもち", 100)])).await;

    let results = uncached_matcher(&store).lookup("いえ").await.unwrap();
    let ranked: Vec<(&str, &str)> = results
        .iter()
        .map(|e| (e.term.as_str(), e.dictionary.as_str()))
        .collect();
    assert_eq!(ranked, vec![("家", "D"), ("家持", "E"), ("家持", "D")]);
}

#[tokio::test]
async fn prefix_only_matches_rank_by_score() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("たべ").await.unwrap();
    assert_eq!(terms(&results), vec!["食べる", "食べ物"]);
}

#[tokio::test]
async fn single_character_only_matches_survive() {
    let store = core_store().await;
    import(
        Arc::new(store.clone()),
        "K",
        &json!([record("ねこじた", "", 2), record("ねずみ", "", 6)]),
    )
    .await;

    // Only "ね" matches anything; 猫 has a distinct reading so it leads
    let results = uncached_matcher(&store).lookup("ねx").await.unwrap();
    assert_eq!(terms(&results), vec!["猫", "ねずみ", "ねこじた"]);
}

#[tokio::test]
async fn results_are_deterministic() {
    let store = core_store().await;
    let matcher = uncached_matcher(&store);
    let first = matcher.lookup("いえもち").await.unwrap();
    for _ in 0..5 {
        assert_eq!(matcher.lookup("いえもち").await.unwrap(), first);
    }
}
