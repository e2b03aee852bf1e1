// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A compact suffix-rewrite table for common Japanese inflections.
//!
//! Each rule rewrites an inflected ending to a dictionary ending and tags the
//! result with the word class it produced. Rules chain: `食べなかった` first
//! becomes `食べない` (an i-adjective shape), which the ichidan negative rule
//! then turns into `食べる`. A rule whose `rules_in` is empty only applies to
//! the surface text itself; otherwise the previous step's class must overlap.
//!
//! Godan rules are generated from the kana rows rather than listed by hand.

use super::{Deinflector, Transformed};
use crate::error::DeinflectError;
use std::collections::HashSet;

const V1: u8 = 1 << 0;
const V5: u8 = 1 << 1;
const VK: u8 = 1 << 2;
const VS: u8 = 1 << 3;
const ADJ_I: u8 = 1 << 4;

/// Rewrites chain at most this many times.
const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone)]
struct Rule {
    inflected: String,
    base: String,
    rules_in: u8,
    rules_out: u8,
}

impl Rule {
    fn new(inflected: &str, base: &str, rules_in: u8, rules_out: u8) -> Self {
        Self {
            inflected: inflected.to_string(),
            base: base.to_string(),
            rules_in,
            rules_out,
        }
    }
}

/// One godan conjugation row: dictionary ending and its stem variants.
struct GodanRow {
    u: &'static str,
    i: &'static str,
    a: &'static str,
    e: &'static str,
    o: &'static str,
    te: &'static str,
    ta: &'static str,
}

const GODAN_ROWS: &[GodanRow] = &[
    GodanRow { u: "う", i: "い", a: "わ", e: "え", o: "お", te: "って", ta: "った" },
    GodanRow { u: "く", i: "き", a: "か", e: "け", o: "こ", te: "いて", ta: "いた" },
    GodanRow { u: "ぐ", i: "ぎ", a: "が", e: "げ", o: "ご", te: "いで", ta: "いだ" },
    GodanRow { u: "す", i: "し", a: "さ", e: "せ", o: "そ", te: "して", ta: "した" },
    GodanRow { u: "つ", i: "ち", a: "た", e: "て", o: "と", te: "って", ta: "った" },
    GodanRow { u: "ぬ", i: "に", a: "な", e: "ね", o: "の", te: "んで", ta: "んだ" },
    GodanRow { u: "ぶ", i: "び", a: "ば", e: "べ", o: "ぼ", te: "んで", ta: "んだ" },
    GodanRow { u: "む", i: "み", a: "ま", e: "め", o: "も", te: "んで", ta: "んだ" },
    GodanRow { u: "る", i: "り", a: "ら", e: "れ", o: "ろ", te: "って", ta: "った" },
];

const POLITE_ENDINGS: &[&str] = &["ます", "ました", "ません", "ませんでした", "ましょう"];

fn build_rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    // Ichidan
    for ending in POLITE_ENDINGS {
        rules.push(Rule::new(ending, "る", 0, V1));
    }
    for (ending, rules_in) in [
        ("た", 0),
        ("て", 0),
        ("ない", ADJ_I),
        ("たい", ADJ_I),
        ("よう", 0),
        ("れば", 0),
        ("ろ", 0),
        ("ず", 0),
        ("られる", V1),
        ("させる", V1),
        ("ている", V1),
    ] {
        rules.push(Rule::new(ending, "る", rules_in, V1));
    }

    // Godan
    for row in GODAN_ROWS {
        for ending in POLITE_ENDINGS {
            rules.push(Rule::new(&format!("{}{}", row.i, ending), row.u, 0, V5));
        }
        rules.push(Rule::new(&format!("{}たい", row.i), row.u, ADJ_I, V5));
        rules.push(Rule::new(&format!("{}ない", row.a), row.u, ADJ_I, V5));
        rules.push(Rule::new(&format!("{}れる", row.a), row.u, V1, V5));
        rules.push(Rule::new(&format!("{}せる", row.a), row.u, V1, V5));
        rules.push(Rule::new(&format!("{}る", row.e), row.u, V1, V5));
        rules.push(Rule::new(&format!("{}ば", row.e), row.u, 0, V5));
        rules.push(Rule::new(&format!("{}う", row.o), row.u, 0, V5));
        rules.push(Rule::new(row.te, row.u, 0, V5));
        rules.push(Rule::new(row.ta, row.u, 0, V5));
        rules.push(Rule::new(&format!("{}いる", row.te), row.u, V1, V5));
    }
    // 行く is irregular in the te/ta forms
    rules.push(Rule::new("いって", "いく", 0, V5));
    rules.push(Rule::new("いった", "いく", 0, V5));
    rules.push(Rule::new("行って", "行く", 0, V5));
    rules.push(Rule::new("行った", "行く", 0, V5));

    // する
    for ending in POLITE_ENDINGS {
        rules.push(Rule::new(&format!("し{}", ending), "する", 0, VS));
    }
    for (inflected, rules_in) in [
        ("した", 0),
        ("して", 0),
        ("しない", ADJ_I),
        ("したい", ADJ_I),
        ("しよう", 0),
        ("すれば", 0),
        ("される", V1),
        ("させる", V1),
        ("している", V1),
    ] {
        rules.push(Rule::new(inflected, "する", rules_in, VS));
    }

    // 来る, in kana and kanji
    for (stem, dict) in [("き", "くる"), ("来", "来る")] {
        for ending in POLITE_ENDINGS {
            rules.push(Rule::new(&format!("{}{}", stem, ending), dict, 0, VK));
        }
        rules.push(Rule::new(&format!("{}た", stem), dict, 0, VK));
        rules.push(Rule::new(&format!("{}て", stem), dict, 0, VK));
    }
    rules.push(Rule::new("こない", "くる", ADJ_I, VK));
    rules.push(Rule::new("こよう", "くる", 0, VK));
    rules.push(Rule::new("くれば", "くる", 0, VK));
    rules.push(Rule::new("来ない", "来る", ADJ_I, VK));

    // i-adjectives
    for (ending, rules_in) in [
        ("かった", 0),
        ("くない", ADJ_I),
        ("くて", 0),
        ("く", 0),
        ("ければ", 0),
        ("さ", 0),
        ("そう", 0),
    ] {
        rules.push(Rule::new(ending, "い", rules_in, ADJ_I));
    }

    rules
}

/// Built-in Japanese suffix rules with bounded chaining.
#[derive(Debug, Clone)]
pub struct SuffixRules {
    rules: Vec<Rule>,
}

impl SuffixRules {
    pub fn new() -> Self {
        Self {
            rules: build_rules(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for SuffixRules {
    fn default() -> Self {
        Self::new()
    }
}

impl Deinflector for SuffixRules {
    fn transform(&self, text: &str) -> Result<Vec<Transformed>, DeinflectError> {
        let mut out = Vec::new();
        let mut emitted: HashSet<String> = HashSet::new();
        let mut visited: HashSet<(String, u8)> = HashSet::new();
        let mut frontier: Vec<(String, u8)> = vec![(text.to_string(), 0)];

        for _ in 0..MAX_DEPTH {
            let mut next = Vec::new();
            for (term, conditions) in &frontier {
                for rule in &self.rules {
                    if *conditions != 0 && conditions & rule.rules_in == 0 {
                        continue;
                    }
                    let Some(stem) = term.strip_suffix(rule.inflected.as_str()) else {
                        continue;
                    };
                    // Bare endings only deinflect to whole irregular words
                    if stem.is_empty() && rule.base.chars().count() < 2 {
                        continue;
                    }
                    let candidate = format!("{}{}", stem, rule.base);
                    if candidate == text || !visited.insert((candidate.clone(), rule.rules_out)) {
                        continue;
                    }
                    if emitted.insert(candidate.clone()) {
                        out.push(Transformed::new(candidate.clone()));
                    }
                    next.push((candidate, rule.rules_out));
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(out)
    }
}
