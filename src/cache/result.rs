// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::{Clock, TtlCache};
use crate::types::Entry;
use std::sync::Arc;
use std::time::Duration;

/// Finished, ranked result lists keyed by the raw query text.
#[derive(Debug)]
pub struct ResultCache {
    cache: TtlCache<String, Arc<Vec<Entry>>>,
}

impl ResultCache {
    pub fn new(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: TtlCache::new(ttl, capacity, clock),
        }
    }

    pub fn get(&self, query: &str) -> Option<Arc<Vec<Entry>>> {
        self.cache.get(query)
    }

    pub fn insert(&self, query: &str, results: Arc<Vec<Entry>>) {
        self.cache.insert(query.to_string(), results);
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
