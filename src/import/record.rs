// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional import records.
//!
//! A record is an 8-element array:
//!
//! | # | field        | accepted                          |
//! |---|--------------|-----------------------------------|
//! | 0 | term         | non-empty string                  |
//! | 1 | reading      | string or null (empty → term)     |
//! | 2 | definition tags | space-separated string or null |
//! | 3 | rules        | space-separated string or null    |
//! | 4 | score        | number or null (null → 0)         |
//! | 5 | definitions  | array                             |
//! | 6 | sequence     | number or null (null → 0)         |
//! | 7 | term tags    | space-separated string or null    |

use crate::error::{Error, Result};
use crate::types::{Definition, Entry};
use serde_json::Value;
use std::collections::BTreeSet;

pub const RECORD_ARITY: usize = 8;

/// One decoded import record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub term: String,
    pub reading: String,
    pub definition_tags: Vec<String>,
    pub rules: Vec<String>,
    pub score: i64,
    pub definitions: Vec<Definition>,
    pub sequence: i64,
    pub term_tags: Vec<String>,
}

impl RawRecord {
    /// Decode record number `index` of an import payload.
    pub fn decode(index: usize, value: &Value) -> Result<Self> {
        let fields = value
            .as_array()
            .ok_or_else(|| Error::malformed_record(index, "record is not an array"))?;
        if fields.len() != RECORD_ARITY {
            return Err(Error::malformed_record(
                index,
                format!("expected {} fields, found {}", RECORD_ARITY, fields.len()),
            ));
        }

        let term = match &fields[0] {
            Value::String(term) if !term.is_empty() => term.clone(),
            _ => return Err(Error::malformed_record(index, "term must be a non-empty string")),
        };

        Ok(Self {
            term,
            reading: optional_string(index, "reading", &fields[1])?.unwrap_or_default(),
            definition_tags: split_tags(index, "definition tags", &fields[2])?,
            rules: split_tags(index, "rules", &fields[3])?,
            score: optional_number(index, "score", &fields[4])?,
            definitions: definitions(index, &fields[5])?,
            sequence: optional_number(index, "sequence", &fields[6])?,
            term_tags: split_tags(index, "term tags", &fields[7])?,
        })
    }

    /// Convert into a stored entry of `dictionary`.
    pub fn into_entry(self, dictionary: &str) -> Entry {
        let tags: BTreeSet<String> = self
            .definition_tags
            .into_iter()
            .chain(self.term_tags)
            .collect();
        Entry {
            tags,
            rules: self.rules,
            score: self.score,
            sequence: self.sequence,
            definitions: self.definitions,
            ..Entry::new(self.term, self.reading, dictionary)
        }
    }
}

fn optional_string(index: usize, field: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(Error::malformed_record(
            index,
            format!("{} must be a string, found {}", field, other),
        )),
    }
}

fn split_tags(index: usize, field: &str, value: &Value) -> Result<Vec<String>> {
    Ok(optional_string(index, field, value)?
        .map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default())
}

fn optional_number(index: usize, field: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| Error::malformed_record(index, format!("{} is out of range", field))),
        other => Err(Error::malformed_record(
            index,
            format!("{} must be a number, found {}", field, other),
        )),
    }
}

fn definitions(index: usize, value: &Value) -> Result<Vec<Definition>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::malformed_record(index, "definitions must be an array"))?;
    Ok(items.iter().map(definition).collect())
}

/// Plain strings and `{"type": "text"}` nodes become text; anything else is kept structured.
fn definition(value: &Value) -> Definition {
    match value {
        Value::String(text) => Definition::Text(text.clone()),
        Value::Object(node) if node.get("type").and_then(Value::as_str) == Some("text") => {
            match node.get("text").and_then(Value::as_str) {
                Some(text) => Definition::Text(text.to_string()),
                None => Definition::Structured(value.clone()),
            }
        }
        other => Definition::Structured(other.clone()),
    }
}
