// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Partial-reading search: the last resort when nothing else matched.
//!
//! Scores every entry in the query's bucket by how many leading kana its
//! reading shares with the query. Unlike the main loop it does not stop at
//! the first prefix length that hits; it sweeps every length down to the
//! minimum and keeps the best score seen per entry.

use crate::cache::BucketCache;
use crate::error::Result;
use crate::types::Entry;
use crate::util::common_prefix_len_chars;
use crate::util::kana::to_hiragana;
use std::collections::HashSet;

/// Entries of `dictionary` whose folded reading shares at least `min_length`
/// leading characters with the folded `query`, best first.
///
/// Score is `common_prefix_len * 1000 + prefix_length`.
pub async fn search_by_partial_reading(
    buckets: &BucketCache,
    dictionary: &str,
    query: &str,
    min_length: usize,
) -> Result<Vec<(Entry, u64)>> {
    let min_length = min_length.max(1);
    let normalized: Vec<char> = to_hiragana(query).chars().collect();
    if normalized.len() < min_length {
        return Ok(Vec::new());
    }

    // Every prefix shares the same leading character, hence the same bucket
    let bucket = buckets.get(dictionary, normalized[0]).await?;
    let readings: Vec<(&Entry, String)> = bucket
        .entries()
        .map(|entry| (entry, to_hiragana(&entry.reading)))
        .collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut found: Vec<(Entry, u64)> = Vec::new();
    for prefix_length in (min_length..=normalized.len()).rev() {
        let prefix: String = normalized[..prefix_length].iter().collect();
        for (entry, reading) in &readings {
            let common = common_prefix_len_chars(reading, &prefix);
            if common >= min_length && seen.insert((entry.term.as_str(), entry.reading.as_str())) {
                let relevance = (common * 1000 + prefix_length) as u64;
                found.push(((*entry).clone(), relevance));
            }
        }
    }

    found.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(found)
}
