// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine tuning knobs.
//!
//! Defaults reproduce the production behaviour: a 10 s / 50-entry bucket
//! cache, a 5 s / 100-entry result cache, deinflection skipped once a direct
//! exact match is found at 4+ characters, and no 1–2 character scanning once
//! a 3+ character match exists. A zero TTL disables that cache.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default store namespace for bucket keys.
pub const DEFAULT_KEY_PREFIX: &str = "bucket";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub bucket_cache_ttl_ms: u64,
    pub bucket_cache_capacity: usize,
    pub result_cache_ttl_ms: u64,
    pub result_cache_capacity: usize,
    /// Prefix length at which a direct exact match suppresses deinflection.
    pub deinflection_skip_length: usize,
    /// Once a longer match exists, the scan stops after the first prefix this
    /// short or shorter.
    pub early_exit_length: usize,
    pub partial_reading_min_length: usize,
    pub key_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bucket_cache_ttl_ms: 10_000,
            bucket_cache_capacity: 50,
            result_cache_ttl_ms: 5_000,
            result_cache_capacity: 100,
            deinflection_skip_length: 4,
            early_exit_length: 2,
            partial_reading_min_length: 2,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
    /// Configuration with both caches disabled.
    pub fn uncached() -> Self {
        Self {
            bucket_cache_ttl_ms: 0,
            result_cache_ttl_ms: 0,
            ..Self::default()
        }
    }

    pub fn bucket_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.bucket_cache_ttl_ms)
    }

    pub fn result_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.result_cache_ttl_ms)
    }

    /// Parse a JSON config; absent fields keep their defaults.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
