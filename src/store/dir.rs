// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::KeyValueStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = ".json";

/// Directory-backed store: one JSON file per key.
///
/// File names are the hex encoding of the key's UTF-8 bytes, so keys holding
/// kanji, `/` or `.` map to safe names. Writes go through a temp file and a
/// rename so a crash never leaves half a bucket behind.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| Error::io(format!("Failed to create {}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", encode_key(key), EXTENSION))
    }
}

fn encode_key(key: &str) -> String {
    hex::encode(key)
}

fn decode_key(name: &str) -> Option<String> {
    let stem = name.strip_suffix(EXTENSION)?;
    hex::decode(stem).ok().and_then(|bytes| String::from_utf8(bytes).ok())
}

#[async_trait]
impl KeyValueStore for DirStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        let bytes = serde_json::to_vec(&value)?;
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| Error::io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::io(format!("Failed to write {}: {}", path.display(), e)))
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        let mut keys = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            if let Some(key) = item.file_name().to_str().and_then(decode_key) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            let path = self.path_for(key);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::io(format!(
                        "Failed to delete {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
        Ok(())
    }
}
