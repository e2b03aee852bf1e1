// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result filtering and ranking.
//!
//! Filtering decides which prefix lengths survive; sorting then orders the
//! survivors. The sort key, highest priority first:
//!
//! 1. **Exact** - term or reading equals the matched text
//! 2. **Length** - longer matched prefix wins
//! 3. **Has reading** - entries whose reading differs from the term
//! 4. **Deinflected** - found through a base form
//! 5. **Shorter term** - only between entries sharing a reading
//! 6. **Reading = query prefix** - reading equals the query's first `length` chars
//! 7. **Score** - descending
//!
//! Key 5 only compares some pairs, so the ordering is not transitive.
//! `slice::sort_by` may panic on such comparators, hence the local merge sort.

use super::MatchedEntry;
use crate::types::Entry;
use crate::util::kana::to_hiragana;
use crate::util::{char_len, char_prefix};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// The query's prefixes, raw and folded, indexed by length.
#[derive(Debug, Clone)]
pub struct QueryPrefixes {
    forms: Vec<(String, String)>,
}

impl QueryPrefixes {
    pub fn new(query: &str) -> Self {
        let forms = (1..=char_len(query))
            .map(|length| {
                let prefix = char_prefix(query, length);
                (prefix.to_string(), to_hiragana(prefix))
            })
            .collect();
        Self { forms }
    }

    /// True if `reading` equals the query's first `length` characters.
    pub fn reading_matches(&self, length: usize, reading: &str) -> bool {
        length
            .checked_sub(1)
            .and_then(|i| self.forms.get(i))
            .is_some_and(|(raw, folded)| reading == raw || reading == folded)
    }
}

/// Keep only the prefix lengths worth showing.
///
/// With any exact match, only lengths holding an exact match survive, longest
/// first, exact before non-exact within a length. Without one, every length
/// survives except length 1 when something longer exists.
pub fn filter_matches(matches: Vec<MatchedEntry>) -> Vec<MatchedEntry> {
    let exact_lengths: BTreeSet<usize> = matches
        .iter()
        .filter(|m| m.exact_match)
        .map(|m| m.length)
        .collect();

    if !exact_lengths.is_empty() {
        let mut kept = Vec::with_capacity(matches.len());
        for &length in exact_lengths.iter().rev() {
            let at_length = matches.iter().filter(|m| m.length == length);
            kept.extend(at_length.clone().filter(|m| m.exact_match).cloned());
            kept.extend(at_length.filter(|m| !m.exact_match).cloned());
        }
        return kept;
    }

    let longest = matches.iter().map(|m| m.length).max().unwrap_or(0);
    if longest > 1 {
        matches.into_iter().filter(|m| m.length > 1).collect()
    } else {
        matches
    }
}

/// Compare two matches for ranking. `Less` means `a` ranks first.
pub fn compare_matches(a: &MatchedEntry, b: &MatchedEntry, query: &QueryPrefixes) -> Ordering {
    b.exact_match
        .cmp(&a.exact_match)
        .then_with(|| b.length.cmp(&a.length))
        .then_with(|| {
            b.entry
                .has_distinct_reading()
                .cmp(&a.entry.has_distinct_reading())
        })
        .then_with(|| b.from_deinflection.cmp(&a.from_deinflection))
        .then_with(|| {
            if a.entry.reading == b.entry.reading {
                char_len(&a.entry.term).cmp(&char_len(&b.entry.term))
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| {
            let a_hit = query.reading_matches(a.length, &a.entry.reading);
            let b_hit = query.reading_matches(b.length, &b.entry.reading);
            b_hit.cmp(&a_hit)
        })
        .then_with(|| b.entry.score.cmp(&a.entry.score))
}

/// Filter, sort, and strip match metadata.
pub fn rank(matches: Vec<MatchedEntry>, query: &str) -> Vec<Entry> {
    let prefixes = QueryPrefixes::new(query);
    let kept = filter_matches(matches);
    merge_sort_by(kept, &mut |a, b| compare_matches(a, b, &prefixes))
        .into_iter()
        .map(|m| m.entry)
        .collect()
}

/// Stable top-down merge sort that never panics on inconsistent comparators.
fn merge_sort_by<T, F>(mut items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, cmp);
    let right = merge_sort_by(right, cmp);

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties keep the left element first
        if cmp(r, l) == Ordering::Less {
            out.extend(right.next());
        } else {
            out.extend(left.next());
        }
    }
    out.extend(left);
    out.extend(right);
    out
}
