// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::{Clock, TtlCache};
use crate::error::Result;
use crate::store::EntryStore;
use crate::types::Bucket;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read-through cache of [`EntryStore`] buckets keyed by `(dictionary, leading)`.
///
/// Missing buckets are cached as empty buckets. Imports write straight to the
/// store and never invalidate this cache, so freshly imported entries may be
/// invisible for up to one TTL.
#[derive(Debug)]
pub struct BucketCache {
    store: EntryStore,
    cache: TtlCache<(String, char), Arc<Bucket>>,
}

impl BucketCache {
    pub fn new(store: EntryStore, ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            cache: TtlCache::new(ttl, capacity, clock),
        }
    }

    pub async fn get(&self, dictionary: &str, leading: char) -> Result<Arc<Bucket>> {
        let key = (dictionary.to_string(), leading);
        if let Some(bucket) = self.cache.get(&key) {
            return Ok(bucket);
        }

        debug!(dictionary, %leading, "bucket cache miss");
        let bucket = Arc::new(
            self.store
                .get_bucket(dictionary, leading)
                .await?
                .unwrap_or_default(),
        );
        self.cache.insert(key, Arc::clone(&bucket));
        Ok(bucket)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
