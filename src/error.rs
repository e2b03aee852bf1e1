// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for lookups, imports, and store access.
//!
//! Only store-level failures and import-shape failures ever reach a caller.
//! Deinflection failures have their own type because they stop at the
//! adapter boundary: a broken rule engine degrades a lookup, it never fails it.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The key/value store is unavailable or returned something unreadable.
    #[error("I/O error: {0}")]
    Io(String),

    /// A stored value did not decode as the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The import payload is not an array of records.
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    /// One record of an import payload has the wrong arity or field types.
    #[error("Malformed record {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// Dictionary names must be non-empty.
    #[error("Invalid dictionary name: {0:?}")]
    InvalidDictionaryName(String),
}

impl Error {
    /// Create an I/O error
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// Create a malformed-record error for record `index`
    pub fn malformed_record(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    /// True for failures that mean data is unavailable (store or codec).
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Json(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Failure inside a deinflection rule engine.
///
/// Never surfaces from [`crate::TermMatcher::lookup`]; the adapter logs it and
/// falls back to the surface form alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("deinflection failed for {text:?}: {reason}")]
pub struct DeinflectError {
    pub text: String,
    pub reason: String,
}

impl DeinflectError {
    pub fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reason: reason.into(),
        }
    }
}
