//! Concrete lookups: inflected verbs, mixed scripts, progressive shortening.

use super::common::{contains, core_store, import, record, terms, uncached_matcher};
use lexmatch::{EngineConfig, MemoryStore, NoDeinflection, TermMatcher};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// DEINFLECTION
// ============================================================================

#[tokio::test]
async fn polite_form_finds_dictionary_form() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("食べます").await.unwrap();

    assert_eq!(terms(&results), vec!["食べる"]);
    assert!(contains(&results, "食べる", "たべる", "D"));
    assert_eq!(results[0].score, 10);
}

#[tokio::test]
async fn irregular_past_finds_dictionary_form() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("行った").await.unwrap();
    assert_eq!(terms(&results), vec!["行く"]);
}

#[tokio::test]
async fn deinflected_longer_match_beats_shorter_direct_match() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("見た").await.unwrap();
    assert_eq!(terms(&results), vec!["見る", "見"]);
}

#[tokio::test]
async fn injected_deinflector_replaces_rules() {
    let store = core_store().await;
    let matcher = TermMatcher::builder(Arc::new(store.clone()))
        .config(EngineConfig::uncached())
        .deinflector(Arc::new(NoDeinflection))
        .build();

    // Without rules only the bare kanji matches
    let results = matcher.lookup("食べます").await.unwrap();
    assert_eq!(terms(&results), vec!["食"]);
}

#[tokio::test]
async fn long_direct_exact_match_skips_deinflection() {
    let store = MemoryStore::new();
    import(
        Arc::new(store.clone()),
        "D",
        &json!([record("食べます", "たべます", 1), record("食べる", "たべる", 10)]),
    )
    .await;

    let results = uncached_matcher(&store).lookup("食べます").await.unwrap();
    assert_eq!(terms(&results), vec!["食べます"]);

    let matcher = TermMatcher::builder(Arc::new(store.clone()))
        .config(EngineConfig {
            deinflection_skip_length: 5,
            ..EngineConfig::uncached()
        })
        .build();
    let results = matcher.lookup("食べます").await.unwrap();
    assert_eq!(terms(&results), vec!["食べる", "食べます"]);
}

// ============================================================================
// SCRIPTS
// ============================================================================

#[tokio::test]
async fn katakana_query_matches_hiragana_reading() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("タベル").await.unwrap();
    assert_eq!(terms(&results), vec!["食べる"]);
}

#[tokio::test]
async fn katakana_headword_matches_directly() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("ハロー").await.unwrap();
    assert_eq!(terms(&results), vec!["ハロー"]);
}

#[tokio::test]
async fn readings_match_across_dictionaries() {
    let store = MemoryStore::new();
    import(Arc::new(store.clone()), "A", &json!([record("日本", "にほん", 1)])).await;
    import(Arc::new(store.clone()), "B", &json!([record("日本", "にっぽん", 5)])).await;

    let results = uncached_matcher(&store).lookup("日本語").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].dictionary, "B");
    assert!(contains(&results, "日本", "にほん", "A"));
}

// ============================================================================
// PROGRESSIVE SHORTENING
// ============================================================================

#[tokio::test]
async fn shortens_until_a_prefix_matches() {
    let store = core_store().await;
    let results = uncached_matcher(&store).lookup("猫がいる").await.unwrap();
    assert_eq!(terms(&results), vec!["猫"]);
}

#[tokio::test]
async fn single_characters_skipped_after_long_match() {
    let store = core_store().await;
    // 食べ matches nothing at length 2 and the scan stops before 食
    let results = uncached_matcher(&store).lookup("食べ物が").await.unwrap();
    assert_eq!(terms(&results), vec!["食べ物"]);

    let matcher = TermMatcher::builder(Arc::new(store.clone()))
        .config(EngineConfig {
            early_exit_length: 0,
            ..EngineConfig::uncached()
        })
        .build();
    let results = matcher.lookup("食べ物が").await.unwrap();
    assert_eq!(terms(&results), vec!["食べ物", "食"]);
}

#[tokio::test]
async fn two_character_compound_kept_after_long_match() {
    let store = MemoryStore::new();
    import(
        Arc::new(store.clone()),
        "D",
        &json!([
            record("日本人", "にほんじん", 1),
            record("日本", "にほん", 5),
            record("日", "ひ", 9),
        ]),
    )
    .await;

    let results = uncached_matcher(&store).lookup("日本人").await.unwrap();
    assert_eq!(terms(&results), vec!["日本人", "日本"]);
}

#[tokio::test]
async fn unknown_text_is_an_empty_result() {
    let store = core_store().await;
    let matcher = uncached_matcher(&store);
    assert!(matcher.lookup("xyz").await.unwrap().is_empty());
    assert!(matcher.lookup("").await.unwrap().is_empty());
}

#[tokio::test]
async fn no_dictionaries_means_no_results() {
    let store = MemoryStore::new();
    let results = uncached_matcher(&store).lookup("食べる").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn store_failure_propagates() {
    let store = core_store().await;
    store.set_failing(true);
    let err = uncached_matcher(&store).lookup("猫").await.unwrap_err();
    assert!(err.is_io());
}
