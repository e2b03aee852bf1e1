//! Lookup properties over generated lexicons.

use super::common::{contains, import, uncached_matcher};
use super::{lexicon_strategy, payload, query_strategy, runtime};
use lexmatch::MemoryStore;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    /// Property: every imported entry is found by looking up its own term.
    #[test]
    fn prop_imported_term_is_found(lexicon in lexicon_strategy()) {
        runtime().block_on(async {
            let store = MemoryStore::new();
            import(Arc::new(store.clone()), "D", &payload(&lexicon)).await;
            let matcher = uncached_matcher(&store);

            for (term, reading, _) in &lexicon {
                let reading = if reading.is_empty() { term } else { reading };
                let results = matcher.lookup(term).await.unwrap();
                assert!(
                    contains(&results, term, reading, "D"),
                    "lookup({}) missed ({}, {}): {:?}",
                    term, term, reading, results
                );
            }
        });
    }

    /// Property: results never repeat an entry and are stable across calls.
    #[test]
    fn prop_results_unique_and_deterministic(
        lexicon in lexicon_strategy(),
        query in query_strategy(),
    ) {
        runtime().block_on(async {
            let store = MemoryStore::new();
            import(Arc::new(store.clone()), "A", &payload(&lexicon)).await;
            import(Arc::new(store.clone()), "B", &payload(&lexicon[..lexicon.len() / 2])).await;
            let matcher = uncached_matcher(&store);

            let first = matcher.lookup(&query).await.unwrap();
            let mut seen = HashSet::new();
            for entry in first.iter() {
                assert!(
                    seen.insert((&entry.dictionary, &entry.term, &entry.reading)),
                    "duplicate {:?} for {}",
                    entry, query
                );
            }
            assert_eq!(matcher.lookup(&query).await.unwrap(), first);
        });
    }

    /// Property: partial-reading results are best first and meet the minimum.
    #[test]
    fn prop_partial_reading_sorted(
        lexicon in lexicon_strategy(),
        query in query_strategy(),
        min_length in 1usize..4,
    ) {
        runtime().block_on(async {
            let store = MemoryStore::new();
            import(Arc::new(store.clone()), "D", &payload(&lexicon)).await;
            let matcher = uncached_matcher(&store);

            let found = matcher
                .search_by_partial_reading("D", &query, min_length)
                .await
                .unwrap();
            for pair in found.windows(2) {
                assert!(pair[0].1 >= pair[1].1);
            }
            for (_, score) in &found {
                assert!(*score >= (min_length as u64) * 1000);
            }
        });
    }
}
