// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The term matcher: hovered text in, ranked dictionary entries out.
//!
//! A lookup walks the query's prefixes from longest to shortest. Each prefix
//! (and its hiragana fold) is matched directly against its bucket in every
//! installed dictionary, then, unless a long direct exact match already
//! settled it, through its deinflected base forms. When the query contains
//! kanji, any kanji headword that matches pulls in its other readings. The
//! collected matches go through [`ranking`], and if that leaves nothing a
//! partial-reading sweep gets the final say.
//!
//! ```text
//! query ─▶ result cache ─hit─▶ done
//!            │ miss
//!            ▼
//!   for len in |query|..=1 ──▶ direct pass ──▶ deinflection pass
//!            │                      (bucket cache ◀─ entry store)
//!            ▼
//!   filter + rank ──empty?──▶ partial-reading fallback
//!            │
//!            ▼
//!   result cache ◀── results
//! ```

pub mod partial;
pub mod ranking;

use crate::cache::{BucketCache, Clock, ResultCache, SystemClock};
use crate::config::EngineConfig;
use crate::deinflect::{DeinflectionAdapter, Deinflector, SuffixRules};
use crate::error::Result;
use crate::store::{EntryStore, KeyValueStore};
use crate::types::{Bucket, Entry};
use crate::util::kana::{has_kanji, to_hiragana, variants};
use crate::util::{char_len, char_prefix, leading_char};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// An entry plus how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedEntry {
    pub entry: Entry,
    /// Length in characters of the query prefix that produced the match.
    pub length: usize,
    pub from_deinflection: bool,
    pub exact_match: bool,
}

/// What an entry was compared against.
#[derive(Debug, Clone, Copy)]
enum Probe<'a> {
    /// A query prefix and its hiragana fold.
    Surface { prefix: &'a str, folded: &'a str },
    /// A base form derived from a query prefix.
    Deinflected { candidate: &'a str },
}

impl Probe<'_> {
    fn is_exact(&self, entry: &Entry) -> bool {
        match *self {
            Probe::Surface { prefix, folded } => {
                entry.term == prefix
                    || entry.reading == prefix
                    || entry.term == folded
                    || entry.reading == folded
            }
            Probe::Deinflected { candidate } => {
                entry.term == candidate || entry.reading == candidate
            }
        }
    }

    fn from_deinflection(&self) -> bool {
        matches!(self, Probe::Deinflected { .. })
    }
}

/// Matches gathered over one lookup, deduplicated by `(dictionary, term, reading)`.
#[derive(Debug, Default)]
struct MatchCollector {
    seen: HashSet<(String, String, String)>,
    matches: Vec<MatchedEntry>,
}

impl MatchCollector {
    /// Record `entry` unless already seen. Returns whether it was new.
    fn record(&mut self, entry: &Entry, length: usize, probe: &Probe<'_>) -> bool {
        let key = (
            entry.dictionary.clone(),
            entry.term.clone(),
            entry.reading.clone(),
        );
        if !self.seen.insert(key) {
            return false;
        }
        self.matches.push(MatchedEntry {
            entry: entry.clone(),
            length,
            from_deinflection: probe.from_deinflection(),
            exact_match: probe.is_exact(entry),
        });
        true
    }

    fn has_direct_exact_at(&self, length: usize) -> bool {
        self.matches
            .iter()
            .any(|m| m.length == length && m.exact_match && !m.from_deinflection)
    }

    fn has_match_longer_than(&self, length: usize) -> bool {
        self.matches.iter().any(|m| m.length > length)
    }
}

/// Direct-pass predicate: a kanji headword matches on its term or a reading
/// starting with the text; a kana headword on a term starting with the text.
fn surface_matches(entry: &Entry, text: &str) -> bool {
    if entry.has_kanji_term() {
        entry.term == text || entry.reading.starts_with(text)
    } else {
        entry.term.starts_with(text)
    }
}

/// Builder for [`TermMatcher`].
#[derive(Debug)]
pub struct TermMatcherBuilder {
    store: Arc<dyn KeyValueStore>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    deinflector: Arc<dyn Deinflector>,
}

impl TermMatcherBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn deinflector(mut self, deinflector: Arc<dyn Deinflector>) -> Self {
        self.deinflector = deinflector;
        self
    }

    pub fn build(self) -> TermMatcher {
        let entries = EntryStore::new(self.store, self.config.key_prefix.clone());
        let buckets = BucketCache::new(
            entries.clone(),
            self.config.bucket_cache_ttl(),
            self.config.bucket_cache_capacity,
            Arc::clone(&self.clock),
        );
        let results = ResultCache::new(
            self.config.result_cache_ttl(),
            self.config.result_cache_capacity,
            self.clock,
        );
        TermMatcher {
            entries,
            buckets,
            results,
            deinflector: DeinflectionAdapter::new(self.deinflector),
            config: self.config,
        }
    }
}

/// Looks hovered text up across every installed dictionary.
///
/// Owns its caches; two matchers over the same store share nothing but the store.
#[derive(Debug)]
pub struct TermMatcher {
    entries: EntryStore,
    buckets: BucketCache,
    results: ResultCache,
    deinflector: DeinflectionAdapter,
    config: EngineConfig,
}

impl TermMatcher {
    /// Matcher with default config, the system clock and the built-in rules.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::builder(store).build()
    }

    pub fn builder(store: Arc<dyn KeyValueStore>) -> TermMatcherBuilder {
        TermMatcherBuilder {
            store,
            config: EngineConfig::default(),
            clock: Arc::new(SystemClock),
            deinflector: Arc::new(SuffixRules::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn entry_store(&self) -> &EntryStore {
        &self.entries
    }

    pub fn bucket_cache(&self) -> &BucketCache {
        &self.buckets
    }

    pub fn result_cache(&self) -> &ResultCache {
        &self.results
    }

    /// Ranked entries for the longest matchable prefix of `query`.
    ///
    /// An empty list means no match. Errors only come from the store.
    #[instrument(level = "debug", skip(self))]
    pub async fn lookup(&self, query: &str) -> Result<Arc<Vec<Entry>>> {
        if let Some(hit) = self.results.get(query) {
            debug!(results = hit.len(), "result cache hit");
            return Ok(hit);
        }

        let dictionaries: Vec<String> = self.entries.list_dictionaries().await?.into_iter().collect();
        let mut results = Vec::new();
        if !dictionaries.is_empty() && !query.is_empty() {
            let expand = has_kanji(query);
            let mut collector = MatchCollector::default();
            self.scan_prefixes(query, &dictionaries, expand, &mut collector)
                .await?;
            debug!(matches = collector.matches.len(), "prefix scan complete");
            results = ranking::rank(collector.matches, query);

            if results.is_empty() && char_len(query) >= 2 {
                debug!("no prefix matches; trying partial readings");
                results = self.reading_fallback(query, &dictionaries, expand).await?;
            }
        }

        let results = Arc::new(results);
        self.results.insert(query, Arc::clone(&results));
        Ok(results)
    }

    /// Entries of `dictionary` whose reading shares a leading run with `query`.
    pub async fn search_by_partial_reading(
        &self,
        dictionary: &str,
        query: &str,
        min_length: usize,
    ) -> Result<Vec<(Entry, u64)>> {
        partial::search_by_partial_reading(&self.buckets, dictionary, query, min_length).await
    }

    async fn scan_prefixes(
        &self,
        query: &str,
        dictionaries: &[String],
        expand: bool,
        collector: &mut MatchCollector,
    ) -> Result<()> {
        for length in (1..=char_len(query)).rev() {
            let prefix = char_prefix(query, length);
            let forms = variants(prefix);
            let folded = forms.last().map_or(prefix, String::as_str);
            let surface = Probe::Surface { prefix, folded };

            for form in &forms {
                self.direct_pass(form, length, &surface, dictionaries, expand, collector)
                    .await?;
            }

            if length >= self.config.deinflection_skip_length && collector.has_direct_exact_at(length)
            {
                debug!(length, "direct exact match; skipping deinflection");
            } else {
                for form in &forms {
                    for candidate in self.deinflector.candidates(form) {
                        if forms.contains(&candidate) {
                            continue;
                        }
                        let probe = Probe::Deinflected {
                            candidate: &candidate,
                        };
                        self.deinflected_pass(&candidate, length, &probe, dictionaries, expand, collector)
                            .await?;
                    }
                }
            }

            // Stop after the first length at or below the threshold once a
            // longer match exists.
            if length <= self.config.early_exit_length
                && collector.has_match_longer_than(self.config.early_exit_length)
            {
                debug!(length, "longer match exists; stopping");
                break;
            }
        }
        Ok(())
    }

    async fn direct_pass(
        &self,
        text: &str,
        length: usize,
        probe: &Probe<'_>,
        dictionaries: &[String],
        expand: bool,
        collector: &mut MatchCollector,
    ) -> Result<()> {
        let Some(leading) = leading_char(text) else {
            return Ok(());
        };
        let mut to_expand = Vec::new();
        for bucket in self.fetch_buckets(dictionaries, leading).await? {
            for entry in bucket.entries().filter(|e| surface_matches(e, text)) {
                if collector.record(entry, length, probe) && expand && entry.has_kanji_term() {
                    to_expand.push(entry.term.clone());
                }
            }
        }
        self.expand_readings(to_expand, length, probe, dictionaries, collector)
            .await
    }

    async fn deinflected_pass(
        &self,
        candidate: &str,
        length: usize,
        probe: &Probe<'_>,
        dictionaries: &[String],
        expand: bool,
        collector: &mut MatchCollector,
    ) -> Result<()> {
        let Some(leading) = leading_char(candidate) else {
            return Ok(());
        };
        let mut to_expand = Vec::new();
        for bucket in self.fetch_buckets(dictionaries, leading).await? {
            let keyed = bucket
                .get(candidate)
                .iter()
                .filter(|e| e.term == candidate || e.reading == candidate);
            for entry in keyed {
                if collector.record(entry, length, probe) && expand && entry.has_kanji_term() {
                    to_expand.push(entry.term.clone());
                }
            }
        }
        self.expand_readings(to_expand, length, probe, dictionaries, collector)
            .await
    }

    /// Record every reading of each kanji headword in `terms`, across dictionaries.
    async fn expand_readings(
        &self,
        mut terms: Vec<String>,
        length: usize,
        probe: &Probe<'_>,
        dictionaries: &[String],
        collector: &mut MatchCollector,
    ) -> Result<()> {
        terms.dedup();
        for term in &terms {
            let Some(leading) = leading_char(term) else {
                continue;
            };
            for bucket in self.fetch_buckets(dictionaries, leading).await? {
                for entry in bucket.get(term).iter().filter(|e| &e.term == term) {
                    collector.record(entry, length, probe);
                }
            }
        }
        Ok(())
    }

    async fn reading_fallback(
        &self,
        query: &str,
        dictionaries: &[String],
        expand: bool,
    ) -> Result<Vec<Entry>> {
        let folded = to_hiragana(query);
        let length = char_len(query);
        let probe = Probe::Surface {
            prefix: query,
            folded: &folded,
        };
        let mut collector = MatchCollector::default();

        for dictionary in dictionaries {
            let found = self
                .search_by_partial_reading(dictionary, query, self.config.partial_reading_min_length)
                .await?;
            let mut to_expand = Vec::new();
            for (entry, _) in &found {
                let reading = to_hiragana(&entry.reading);
                let related = reading == folded
                    || folded.starts_with(&reading)
                    || reading.starts_with(&folded);
                if related
                    && collector.record(entry, length, &probe)
                    && expand
                    && entry.has_kanji_term()
                {
                    to_expand.push(entry.term.clone());
                }
            }
            self.expand_readings(to_expand, length, &probe, dictionaries, &mut collector)
                .await?;
        }

        let mut entries: Vec<Entry> = collector.matches.into_iter().map(|m| m.entry).collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(entries)
    }

    /// One bucket per dictionary, fetched concurrently.
    async fn fetch_buckets(&self, dictionaries: &[String], leading: char) -> Result<Vec<Arc<Bucket>>> {
        try_join_all(
            dictionaries
                .iter()
                .map(|dictionary| self.buckets.get(dictionary, leading)),
        )
        .await
    }
}
