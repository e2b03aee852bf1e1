// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persistence: a key/value store and the entry namespace on top of it.
//!
//! The engine never touches disk directly. Everything goes through
//! [`KeyValueStore`], an async get/set/keys/delete interface that an
//! embedding application implements over whatever it persists to.
//! [`EntryStore`] adds the bucket key namespace and nothing else.
//!
//! ## Implementations
//!
//! - [`MemoryStore`]: in-process map, with read counting and fault injection
//!   for tests
//! - [`DirStore`]: one JSON file per key under a directory (the CLI's store)

mod dir;
mod entries;
mod memory;

pub use dir::DirStore;
pub use entries::EntryStore;
pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// Async key/value persistence.
///
/// A missing key is `Ok(None)`, never an error. Errors mean the store itself
/// failed and are surfaced to whoever started the operation.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    /// Read the value at `key`.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write `value` at `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Every key currently stored. May be expensive; used by maintenance only.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Delete `keys`. Absent keys are ignored.
    async fn delete_many(&self, keys: &[String]) -> Result<()>;
}
