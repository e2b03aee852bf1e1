// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script classification and katakana → hiragana folding.
//!
//! Hovered text freely mixes kanji, hiragana and katakana. Dictionary
//! readings are stored in hiragana, so every query prefix is also tried in
//! its hiragana form. NFKC runs first so half-width katakana (`ｶﾞ`) and
//! full-width ASCII collapse before the shift.

use unicode_normalization::UnicodeNormalization;

/// Offset between a katakana scalar and its hiragana twin.
const KATAKANA_SHIFT: u32 = 0x60;

/// True for CJK ideographs and the iteration mark.
#[inline]
pub fn is_kanji(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |  // Extension A
        '\u{F900}'..='\u{FAFF}' |  // Compatibility Ideographs
        '々'
    )
}

/// True if any character of `s` is a kanji.
pub fn has_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

fn katakana_to_hiragana_char(c: char) -> char {
    if ('\u{30A1}'..='\u{30F6}').contains(&c) {
        char::from_u32(c as u32 - KATAKANA_SHIFT).unwrap_or(c)
    } else {
        c
    }
}

/// Fold `s` to its phonetic (hiragana) form.
pub fn to_hiragana(s: &str) -> String {
    s.nfkc().map(katakana_to_hiragana_char).collect()
}

/// Query variants for one prefix: the prefix itself, plus its hiragana form
/// when folding changed it.
pub fn variants(prefix: &str) -> Vec<String> {
    let folded = to_hiragana(prefix);
    if folded == prefix {
        vec![prefix.to_string()]
    } else {
        vec![prefix.to_string(), folded]
    }
}
