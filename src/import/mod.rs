// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Importing dictionaries and keeping the store consistent.
//!
//! Import runs in four phases, each reported through a progress callback:
//!
//! 1. **Read**: parse the payload text as JSON
//! 2. **Parse**: decode every record; a malformed one aborts the import
//!    before anything is written
//! 3. **Process**: stage entries into per-leading-character buckets
//! 4. **Store**: merge each staged bucket into the stored one and write it back
//!
//! The store phase is not transactional. If writing one bucket fails, the
//! buckets written before it stay, and the dictionary is not registered.
//! [`Importer::find_orphaned_buckets`] finds what such a failure leaves behind.

mod record;

pub use record::{RawRecord, RECORD_ARITY};

use crate::error::{Error, Result};
use crate::store::EntryStore;
use crate::types::{Bucket, BucketKey, DictionaryMetadata};
use crate::util::leading_char;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Import phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportPhase {
    Read,
    Parse,
    Process,
    Store,
    Done,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImportPhase::Read => "reading",
            ImportPhase::Parse => "parsing",
            ImportPhase::Process => "processing",
            ImportPhase::Store => "storing",
            ImportPhase::Done => "done",
        };
        f.write_str(label)
    }
}

/// Coarse import progress. `percent` never decreases and ends at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    pub phase: ImportPhase,
    pub percent: u8,
}

/// What an import changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries that were not already present.
    pub entries_added: usize,
    /// Entries dropped as duplicates of stored or earlier records.
    pub entries_skipped: usize,
    pub buckets_written: usize,
}

/// Writes dictionaries into an [`EntryStore`] and repairs it.
#[derive(Debug, Clone)]
pub struct Importer {
    entries: EntryStore,
}

impl Importer {
    pub fn new(entries: EntryStore) -> Self {
        Self { entries }
    }

    /// Import a payload given as JSON text.
    pub async fn import_json<P>(
        &self,
        dictionary: &str,
        metadata: DictionaryMetadata,
        text: &str,
        mut progress: P,
    ) -> Result<ImportReport>
    where
        P: FnMut(ImportProgress),
    {
        report(&mut progress, ImportPhase::Read, 0);
        let payload: Value = serde_json::from_str(text)
            .map_err(|err| Error::MalformedImport(format!("invalid JSON: {}", err)))?;
        report(&mut progress, ImportPhase::Read, 10);
        self.import_entries(dictionary, metadata, &payload, progress)
            .await
    }

    /// Import an array of records into `dictionary`.
    ///
    /// Re-importing a record already stored under the same `(term, reading)` is
    /// a no-op for that record. `metadata` is only recorded when the dictionary
    /// is new; `sequenced` is derived from the records.
    #[instrument(level = "info", skip(self, metadata, payload, progress))]
    pub async fn import_entries<P>(
        &self,
        dictionary: &str,
        mut metadata: DictionaryMetadata,
        payload: &Value,
        mut progress: P,
    ) -> Result<ImportReport>
    where
        P: FnMut(ImportProgress),
    {
        if dictionary.is_empty() {
            return Err(Error::InvalidDictionaryName(dictionary.to_string()));
        }
        let records = payload
            .as_array()
            .ok_or_else(|| Error::MalformedImport("payload is not an array".to_string()))?;

        report(&mut progress, ImportPhase::Parse, 10);
        let records = records
            .iter()
            .enumerate()
            .map(|(index, value)| RawRecord::decode(index, value))
            .collect::<Result<Vec<_>>>()?;
        metadata.sequenced = records.iter().any(|r| r.sequence > 0);
        report(&mut progress, ImportPhase::Parse, 30);

        let mut summary = ImportReport::default();
        let mut staged: BTreeMap<char, Bucket> = BTreeMap::new();
        let total = records.len().max(1);
        for (i, record) in records.into_iter().enumerate() {
            let entry = record.into_entry(dictionary);
            if let Some(leading) = leading_char(&entry.term) {
                let term = entry.term.clone();
                if !staged.entry(leading).or_default().insert_unique(&term, entry.clone()) {
                    summary.entries_skipped += 1;
                    continue;
                }
            }
            if entry.has_distinct_reading() {
                if let Some(leading) = leading_char(&entry.reading) {
                    let reading = entry.reading.clone();
                    staged.entry(leading).or_default().insert_unique(&reading, entry);
                }
            }
            report(&mut progress, ImportPhase::Process, 30 + scaled(i + 1, total, 30));
        }
        report(&mut progress, ImportPhase::Process, 60);

        let groups = staged.len().max(1);
        for (i, (leading, bucket)) in staged.into_iter().enumerate() {
            let mut stored = self
                .entries
                .get_bucket(dictionary, leading)
                .await?
                .unwrap_or_default();
            for (key, entries) in bucket {
                for entry in entries {
                    let primary = key == entry.term;
                    let added = stored.insert_unique(&key, entry);
                    match (primary, added) {
                        (true, true) => summary.entries_added += 1,
                        (true, false) => summary.entries_skipped += 1,
                        _ => {}
                    }
                }
            }
            self.entries.put_bucket(dictionary, leading, &stored).await?;
            summary.buckets_written += 1;
            debug!(%leading, keys = stored.keys().count(), "bucket written");
            report(&mut progress, ImportPhase::Store, 60 + scaled(i + 1, groups, 40));
        }

        let index = self.entries.dictionary_index().await?;
        if !index.contains_key(dictionary) {
            self.entries.put_dictionary(dictionary, metadata).await?;
        }
        report(&mut progress, ImportPhase::Done, 100);

        info!(
            added = summary.entries_added,
            skipped = summary.entries_skipped,
            buckets = summary.buckets_written,
            "import complete"
        );
        Ok(summary)
    }

    /// Unregister `name` and delete all of its buckets. Returns buckets deleted.
    #[instrument(level = "info", skip(self))]
    pub async fn delete_dictionary(&self, name: &str) -> Result<usize> {
        let deleted = self.entries.delete_dictionary(name).await?;
        info!(buckets = deleted, "dictionary deleted");
        Ok(deleted)
    }

    /// Bucket keys whose dictionary is not installed.
    pub async fn find_orphaned_buckets(&self) -> Result<Vec<BucketKey>> {
        let installed: BTreeSet<String> = self.entries.list_dictionaries().await?;
        let orphans: Vec<BucketKey> = self
            .entries
            .list_all_bucket_keys()
            .await?
            .into_iter()
            .filter(|key| !installed.contains(&key.dictionary))
            .collect();
        if !orphans.is_empty() {
            warn!(count = orphans.len(), "orphaned buckets found");
        }
        Ok(orphans)
    }

    /// Delete every orphaned bucket. Returns the keys deleted.
    pub async fn cleanup_orphaned_buckets(&self) -> Result<Vec<BucketKey>> {
        let orphans = self.find_orphaned_buckets().await?;
        if !orphans.is_empty() {
            self.entries.delete_buckets(&orphans).await?;
            info!(count = orphans.len(), "orphaned buckets removed");
        }
        Ok(orphans)
    }
}

fn report<P: FnMut(ImportProgress)>(progress: &mut P, phase: ImportPhase, percent: u8) {
    progress(ImportProgress { phase, percent });
}

/// `done / total` of `span` percentage points.
fn scaled(done: usize, total: usize, span: u8) -> u8 {
    ((done.min(total) * span as usize) / total) as u8
}
