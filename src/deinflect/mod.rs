// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deinflection: from a conjugated surface form back to dictionary forms.
//!
//! The engine only consumes a rule engine's output through [`Deinflector`]:
//! give it text, get back candidate base forms. [`DeinflectionAdapter`] is the
//! boundary that keeps a failing engine from failing a lookup, and that
//! guarantees the surface text is always candidate number one.

mod rules;

pub use rules::SuffixRules;

use crate::error::DeinflectError;
use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::warn;

/// One candidate produced by a rule engine. Only `text` is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
}

impl Transformed {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A deinflection rule engine.
pub trait Deinflector: Debug + Send + Sync {
    fn transform(&self, text: &str) -> Result<Vec<Transformed>, DeinflectError>;
}

/// A deinflector that knows no rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeinflection;

impl Deinflector for NoDeinflection {
    fn transform(&self, _text: &str) -> Result<Vec<Transformed>, DeinflectError> {
        Ok(Vec::new())
    }
}

/// Wraps a [`Deinflector`] into an infallible candidate generator.
#[derive(Debug, Clone)]
pub struct DeinflectionAdapter {
    engine: Arc<dyn Deinflector>,
}

impl DeinflectionAdapter {
    pub fn new(engine: Arc<dyn Deinflector>) -> Self {
        Self { engine }
    }

    /// Distinct candidates for `surface`, with `surface` itself first.
    ///
    /// On engine failure the result is `[surface]`.
    pub fn candidates(&self, surface: &str) -> Vec<String> {
        let mut out = vec![surface.to_string()];
        let transformed = match self.engine.transform(surface) {
            Ok(transformed) => transformed,
            Err(err) => {
                warn!(error = %err, "deinflection failed; using surface form only");
                return out;
            }
        };

        let mut seen: HashSet<String> = HashSet::from([surface.to_string()]);
        for candidate in transformed {
            if !candidate.text.is_empty() && seen.insert(candidate.text.clone()) {
                out.push(candidate.text);
            }
        }
        out
    }
}

impl Default for DeinflectionAdapter {
    fn default() -> Self {
        Self::new(Arc::new(SuffixRules::new()))
    }
}
