// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of an imported lexicon.
//!
//! Entries live in buckets, and a bucket holds every entry whose term or
//! reading starts with one character. An entry is indexed twice when its
//! reading differs from its term, once under each string, so a lookup by
//! either costs one bucket read.
//!
//! # Invariants
//!
//! - **Entry**: `term` is non-empty; `reading` is never empty (it defaults to
//!   `term` at construction).
//! - **Bucket**: within one index key, no two entries share `(term, reading)`.
//! - **BucketKey**: renders as `"<prefix>_<dictionary>_<leading>"` and parses
//!   back to the same value, even when the dictionary name contains `_`.

use crate::util::kana::has_kanji;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// ENTRIES
// =============================================================================

/// One gloss of an entry.
///
/// Import converts the loosely-shaped source definitions once; everything
/// downstream works with this closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Definition {
    /// Plain gloss text.
    Text(String),
    /// Structured content node (rich markup, images, nested lists), kept as-is
    /// for the renderer.
    Structured(serde_json::Value),
}

impl Definition {
    /// Plain text of the definition, if it is a text gloss.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Definition::Text(text) => Some(text),
            Definition::Structured(_) => None,
        }
    }
}

/// A dictionary entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub term: String,
    pub reading: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Deinflection rule classes this term conjugates under (`v1`, `v5`, `adj-i`...).
    #[serde(default)]
    pub rules: Vec<String>,
    /// Popularity score; higher ranks first among otherwise equal matches.
    #[serde(default)]
    pub score: i64,
    /// Source sequence number, 0 when the dictionary is unsequenced.
    #[serde(default)]
    pub sequence: i64,
    pub dictionary: String,
}

impl Entry {
    /// Create an entry with no definitions. An empty `reading` falls back to `term`.
    pub fn new(
        term: impl Into<String>,
        reading: impl Into<String>,
        dictionary: impl Into<String>,
    ) -> Self {
        let term = term.into();
        let mut reading = reading.into();
        if reading.is_empty() {
            reading = term.clone();
        }
        Self {
            term,
            reading,
            definitions: Vec::new(),
            tags: BTreeSet::new(),
            rules: Vec::new(),
            score: 0,
            sequence: 0,
            dictionary: dictionary.into(),
        }
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// True when the headword contains at least one kanji.
    pub fn has_kanji_term(&self) -> bool {
        has_kanji(&self.term)
    }

    /// True when the entry carries a reading distinct from its headword.
    pub fn has_distinct_reading(&self) -> bool {
        self.reading != self.term
    }

    /// Same logical entry within one dictionary.
    pub fn same_headword(&self, other: &Entry) -> bool {
        self.term == other.term && self.reading == other.reading
    }
}

// =============================================================================
// DICTIONARY INDEX
// =============================================================================

/// Per-dictionary metadata recorded on first import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryMetadata {
    pub title: String,
    pub revision: String,
    #[serde(default)]
    pub sequenced: bool,
}

impl DictionaryMetadata {
    pub fn new(title: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            revision: revision.into(),
            sequenced: false,
        }
    }
}

/// Installed dictionaries by name. Ordered so fan-out is deterministic.
pub type DictionaryIndex = BTreeMap<String, DictionaryMetadata>;

// =============================================================================
// BUCKETS
// =============================================================================

/// All entries of one dictionary whose term or reading starts with one character.
///
/// Maps an index key (a term or a reading) to the entries filed under it, in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket {
    keys: BTreeMap<String, Vec<Entry>>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries filed under exactly `key`.
    pub fn get(&self, key: &str) -> &[Entry] {
        self.keys.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every entry in the bucket. An entry filed under both its term and its
    /// reading is yielded twice.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.keys.values().flatten()
    }

    /// Index keys in the bucket.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// File `entry` under `key` unless an entry with the same `(term, reading)`
    /// is already there. Returns whether it was added.
    pub fn insert_unique(&mut self, key: &str, entry: Entry) -> bool {
        let list = self.keys.entry(key.to_string()).or_default();
        if list.iter().any(|existing| existing.same_headword(&entry)) {
            return false;
        }
        list.push(entry);
        true
    }

    /// Merge `other` into `self`, deduplicating per key. Returns how many
    /// entries were added.
    pub fn merge(&mut self, other: Bucket) -> usize {
        let mut added = 0;
        for (key, entries) in other.keys {
            for entry in entries {
                if self.insert_unique(&key, entry) {
                    added += 1;
                }
            }
        }
        added
    }

    pub fn is_empty(&self) -> bool {
        self.keys.values().all(Vec::is_empty)
    }

    /// Number of filed entries, counting double-indexed entries twice.
    pub fn len(&self) -> usize {
        self.keys.values().map(Vec::len).sum()
    }
}

impl IntoIterator for Bucket {
    type Item = (String, Vec<Entry>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<Entry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

/// Identifies a bucket in the store: `(dictionary, leading character)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub dictionary: String,
    pub leading: char,
}

impl BucketKey {
    pub fn new(dictionary: impl Into<String>, leading: char) -> Self {
        Self {
            dictionary: dictionary.into(),
            leading,
        }
    }

    /// Store key: `"<prefix>_<dictionary>_<leading>"`.
    pub fn to_store_key(&self, prefix: &str) -> String {
        format!("{}_{}_{}", prefix, self.dictionary, self.leading)
    }

    /// Parse a store key produced by [`BucketKey::to_store_key`].
    ///
    /// The leading character is always the last scalar, so dictionary names
    /// containing `_` round-trip.
    pub fn parse(prefix: &str, key: &str) -> Option<Self> {
        let rest = key.strip_prefix(prefix)?.strip_prefix('_')?;
        let leading = rest.chars().next_back()?;
        let head = &rest[..rest.len() - leading.len_utf8()];
        let dictionary = head.strip_suffix('_')?;
        if dictionary.is_empty() {
            return None;
        }
        Some(Self::new(dictionary, leading))
    }
}
