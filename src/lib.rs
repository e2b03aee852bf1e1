// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hover lookup over imported Japanese lexicons.
//!
//! Give [`TermMatcher::lookup`] the text under the cursor and it returns the
//! dictionary entries for the longest prefix that means something, ranked.
//! Kanji, hiragana and katakana can all appear in one query; conjugated verbs
//! and adjectives are traced back to their dictionary forms.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  import      │────▶│ store        │◀────│ cache        │
//! │ (records →   │     │ (EntryStore, │     │ (BucketCache,│
//! │  buckets)    │     │  KeyValue-   │     │  ResultCache)│
//! └──────────────┘     │  Store)      │     └──────────────┘
//!                      └──────────────┘            ▲
//!                                                  │
//! ┌──────────────┐     ┌─────────────────────────────────────┐
//! │  deinflect   │────▶│              matcher                 │
//! │ (candidates) │     │  (lookup, ranking, partial reading)  │
//! └──────────────┘     └─────────────────────────────────────┘
//! ```
//!
//! Storage is keyed by `(dictionary, leading character)`. An entry is filed
//! under its term and, when different, under its reading, so a lookup by
//! either one touches a single bucket per dictionary.
//!
//! # Usage
//!
//! ```ignore
//! use lexmatch::{DictionaryMetadata, Importer, MemoryStore, TermMatcher};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let matcher = TermMatcher::new(store);
//! Importer::new(matcher.entry_store().clone())
//!     .import_json("jmdict", DictionaryMetadata::new("JMdict", "1"), &text, |_| {})
//!     .await?;
//!
//! let entries = matcher.lookup("食べました").await?;
//! ```

pub mod cache;
pub mod config;
pub mod deinflect;
pub mod error;
pub mod import;
pub mod matcher;
pub mod store;
pub mod types;
pub mod util;

pub use cache::{BucketCache, Clock, ManualClock, ResultCache, SystemClock, TtlCache};
pub use config::EngineConfig;
pub use deinflect::{DeinflectionAdapter, Deinflector, NoDeinflection, SuffixRules, Transformed};
pub use error::{DeinflectError, Error, Result};
pub use import::{ImportPhase, ImportProgress, ImportReport, Importer, RawRecord};
pub use matcher::{MatchedEntry, TermMatcher, TermMatcherBuilder};
pub use store::{DirStore, EntryStore, KeyValueStore, MemoryStore};
pub use types::{Bucket, BucketKey, Definition, DictionaryIndex, DictionaryMetadata, Entry};
