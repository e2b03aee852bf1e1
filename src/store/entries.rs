// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bucket and dictionary-index namespacing over a [`KeyValueStore`].
//!
//! Bucket keys are `"<prefix>_<dictionary>_<leading>"`. The dictionary index
//! lives under `"<prefix>:dictionaries"`, which no bucket key can equal since
//! bucket keys continue the prefix with `_`.

use super::KeyValueStore;
use crate::error::Result;
use crate::types::{Bucket, BucketKey, DictionaryIndex, DictionaryMetadata};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Data access for buckets and the dictionary index. No business logic.
#[derive(Debug, Clone)]
pub struct EntryStore {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl EntryStore {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn index_key(&self) -> String {
        format!("{}:dictionaries", self.prefix)
    }

    /// Read one bucket. A bucket that was never written is `None`.
    pub async fn get_bucket(&self, dictionary: &str, leading: char) -> Result<Option<Bucket>> {
        let key = BucketKey::new(dictionary, leading).to_store_key(&self.prefix);
        match self.store.get(&key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn put_bucket(&self, dictionary: &str, leading: char, bucket: &Bucket) -> Result<()> {
        let key = BucketKey::new(dictionary, leading).to_store_key(&self.prefix);
        self.store.set(&key, serde_json::to_value(bucket)?).await
    }

    /// The installed dictionaries and their metadata.
    pub async fn dictionary_index(&self) -> Result<DictionaryIndex> {
        match self.store.get(&self.index_key()).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(DictionaryIndex::new()),
        }
    }

    pub async fn list_dictionaries(&self) -> Result<BTreeSet<String>> {
        Ok(self.dictionary_index().await?.into_keys().collect())
    }

    /// Record `name` in the dictionary index, replacing earlier metadata.
    pub async fn put_dictionary(&self, name: &str, metadata: DictionaryMetadata) -> Result<()> {
        let mut index = self.dictionary_index().await?;
        index.insert(name.to_string(), metadata);
        self.store
            .set(&self.index_key(), serde_json::to_value(&index)?)
            .await
    }

    /// Remove `name` from the index and delete every bucket it owns.
    ///
    /// Buckets are matched on the parsed dictionary name, so deleting `"D"`
    /// leaves `"D_extra"` alone. Returns the number of buckets deleted.
    pub async fn delete_dictionary(&self, name: &str) -> Result<usize> {
        let mut index = self.dictionary_index().await?;
        if index.remove(name).is_some() {
            self.store
                .set(&self.index_key(), serde_json::to_value(&index)?)
                .await?;
        }

        let doomed: Vec<String> = self
            .list_all_bucket_keys()
            .await?
            .into_iter()
            .filter(|key| key.dictionary == name)
            .map(|key| key.to_store_key(&self.prefix))
            .collect();
        self.store.delete_many(&doomed).await?;
        Ok(doomed.len())
    }

    /// Every bucket key in the store, across all dictionaries (installed or not).
    pub async fn list_all_bucket_keys(&self) -> Result<Vec<BucketKey>> {
        Ok(self
            .store
            .keys()
            .await?
            .iter()
            .filter_map(|key| BucketKey::parse(&self.prefix, key))
            .collect())
    }

    pub async fn delete_buckets(&self, keys: &[BucketKey]) -> Result<()> {
        let raw: Vec<String> = keys
            .iter()
            .map(|key| key.to_store_key(&self.prefix))
            .collect();
        self.store.delete_many(&raw).await
    }
}
