// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for script handling and character-level string work.
//!
//! Lookups deal in Unicode scalars throughout: a "length" is a count of
//! characters, never bytes, because the hovered text mixes multi-byte kanji
//! and kana with the occasional ASCII.

pub mod kana;

/// Calculate the common prefix length of two strings (in characters).
pub fn common_prefix_len_chars(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(ca, cb)| ca == cb)
        .count()
}

/// Number of Unicode scalars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s` (all of `s` if it is shorter).
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

/// First character of `s`, the bucket it lives in.
#[inline]
pub fn leading_char(s: &str) -> Option<char> {
    s.chars().next()
}
