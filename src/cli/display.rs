// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the lexmatch CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. Detection tries
//! `LEXMATCH_THEME` first, then `COLORFGBG`, then defaults to dark. `NO_COLOR`
//! and non-TTY output turn colors off entirely.
//!
//! Widths are measured in terminal columns, not chars: kanji and kana take two
//! columns each, so box borders still line up around Japanese text.

use lexmatch::{BucketKey, Definition, DictionaryIndex, Entry};
use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("LEXMATCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    paint(use_colors(), color_fn, modifiers, text)
}

fn paint(colors: bool, color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if colors {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Terminal columns taken by `c`.
fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

/// Visible width in columns, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += char_width(c);
        }
    }
    len
}

/// Cut plain text to at most `width` columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if visible_len(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    println!("{}", row_line(content, use_colors()));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    println!("{}", section_top_line(label, use_colors()));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", section_bot_line(use_colors()));
}

fn row_line(content: &str, colors: bool) -> String {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let edge = paint(colors, GRAY, &[], "│");
    format!("{}{}{}{}", edge, content, " ".repeat(pad), edge)
}

fn section_top_line(label: &str, colors: bool) -> String {
    let label_part = format!("─ {} ", paint(colors, CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!(
        "{}{}{}",
        paint(colors, GRAY, &[], "┌"),
        label_part,
        paint(colors, GRAY, &[], &format!("{}┐", "─".repeat(remaining)))
    )
}

fn section_bot_line(colors: bool) -> String {
    paint(colors, GRAY, &[], &format!("└{}┘", "─".repeat(BOX_WIDTH)))
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded popularity score
pub fn score_value(score: i64) -> String {
    let text = format!("{:>6}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 100 {
        GREEN()
    } else if score > 0 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

/// Headword line: `食べる【たべる】`, reading omitted when it equals the term.
pub fn headword(entry: &Entry) -> String {
    let term = themed(BRIGHT_CYAN, &[BOLD], &entry.term);
    if entry.has_distinct_reading() {
        format!("{}【{}】", term, themed(GREEN, &[], &entry.reading))
    } else {
        term
    }
}

fn definition_text(definition: &Definition) -> String {
    match definition {
        Definition::Text(text) => text.clone(),
        Definition::Structured(node) => node.to_string(),
    }
}

/// Print ranked lookup results as one boxed section.
pub fn print_entries(query: &str, entries: &[Entry]) {
    section_top(&format!("{} ({} results)", query, entries.len()));
    if entries.is_empty() {
        row(&themed(GRAY, &[], " no match"));
    }
    for (rank, entry) in entries.iter().enumerate() {
        let badge = themed(MAGENTA, &[], &format!("[{}]", entry.dictionary));
        let head = format!(" {:>2}. {} {}", rank + 1, headword(entry), badge);
        let score = score_value(entry.score);
        let gap = BOX_WIDTH.saturating_sub(visible_len(&head) + visible_len(&score) + 1);
        row(&format!("{}{}{} ", head, " ".repeat(gap), score));

        if !entry.tags.is_empty() {
            let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
            row(&themed(BLUE, &[], &format!("     {}", truncate(&tags.join(" "), BOX_WIDTH - 6))));
        }
        for (i, definition) in entry.definitions.iter().enumerate() {
            let line = format!("{}) {}", i + 1, definition_text(definition));
            row(&format!("     {}", truncate(&line, BOX_WIDTH - 6)));
        }
    }
    section_bot();
}

/// Print the installed dictionaries.
pub fn print_dictionaries(index: &DictionaryIndex) {
    section_top("Dictionaries");
    if index.is_empty() {
        row(&themed(GRAY, &[], " none installed"));
    }
    for (name, metadata) in index {
        let sequenced = if metadata.sequenced { " sequenced" } else { "" };
        row(&format!(
            " {} {} rev {}{}",
            themed(BRIGHT_CYAN, &[BOLD], name),
            themed(GRAY, &[], &metadata.title),
            metadata.revision,
            themed(YELLOW, &[], sequenced)
        ));
    }
    section_bot();
}

/// Print orphaned bucket keys.
pub fn print_orphans(orphans: &[BucketKey], removed: bool) {
    let label = if removed { "Removed orphans" } else { "Orphaned buckets" };
    section_top(label);
    if orphans.is_empty() {
        row(&themed(GREEN, &[], " store is consistent"));
    }
    for key in orphans {
        row(&format!(
            " {} {}",
            themed(MAGENTA, &[], &key.dictionary),
            key.leading
        ));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
