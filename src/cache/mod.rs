// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Time-boxed, size-bounded caches.
//!
//! Both caches in the engine share one policy: a record is reusable while it
//! is younger than the TTL, and when an insert pushes the cache over
//! capacity the oldest-*inserted* key goes. Reads never reorder anything;
//! this is not LRU.
//!
//! Each cache owns a lock around its check-insert-evict sequence. The lock is
//! never held across an `.await`: a miss releases it, fetches, then re-locks
//! to insert, so two concurrent misses for one key both fetch and the later
//! write wins. Both writes carry equivalent values, which is acceptable.
//!
//! Time comes from an injected [`Clock`] so tests can step it by hand.

mod bucket;
mod result;

pub use bucket::BucketCache;
pub use result::ResultCache;

use lru::LruCache;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

// ============================================================================
// CLOCKS
// ============================================================================

/// Source of "now" for TTL checks.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }
}

// ============================================================================
// TTL CACHE
// ============================================================================

/// A cached value and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheRecord<V> {
    pub value: V,
    pub inserted_at: Instant,
}

/// TTL + capacity cache with insertion-order eviction.
///
/// Backed by an [`LruCache`] that is only ever read with `peek`, so the
/// recency order it keeps is the insertion order. A capacity of 0 holds
/// nothing.
#[derive(Debug)]
pub struct TtlCache<K: Hash + Eq, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    inner: Option<Mutex<LruCache<K, CacheRecord<V>>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// The cached value, if present and younger than the TTL.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let cache = self.inner.as_ref()?.lock();
        let record = cache.peek(key)?;
        let age = now.saturating_duration_since(record.inserted_at);
        (age < self.ttl).then(|| record.value.clone())
    }

    /// Store `value` stamped with the current time.
    ///
    /// Re-inserting an existing key refreshes its stamp and moves it to the
    /// back of the eviction order. At capacity the oldest-inserted key is
    /// dropped.
    pub fn insert(&self, key: K, value: V) {
        let Some(inner) = &self.inner else {
            return;
        };
        let inserted_at = self.clock.now();
        inner.lock().put(key, CacheRecord { value, inserted_at });
    }

    /// Number of records held, expired or not.
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.lock().contains(key))
    }

    pub fn clear(&self) {
        if let Some(inner) = &self.inner {
            inner.lock().clear();
        }
    }
}
