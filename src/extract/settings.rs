// src/extract/settings.rs
use std::ops::RangeInclusive;

use crate::config::consts::{
    ANCHOR_COUNT, GLOBAL_MAX, LOOKAHEAD_LINES, SABER11_SUBJECTS, TOKEN_DIGITS,
};
use super::decode::DecodeRules;

/// One exam area: canonical column name plus the substring that must show
/// up on the header line for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub anchor: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self { name: name.into(), anchor: anchor.into() }
    }

    /// Anchor on the full name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { anchor: name.clone(), name }
    }
}

/// Immutable extractor configuration.
///
/// Defaults describe the Saber 11 report; another exam layout only needs a
/// different subject table (and maybe different thresholds).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractorSettings {
    subjects: Vec<Subject>,
    anchor_count: usize,
    lookahead_lines: usize,
    token_digits: RangeInclusive<usize>,
    global_max: u16,
    decode: DecodeRules,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        let subjects = SABER11_SUBJECTS
            .iter()
            .map(|(name, anchor)| Subject::new(*name, *anchor))
            .collect();
        Self {
            subjects,
            anchor_count: ANCHOR_COUNT,
            lookahead_lines: LOOKAHEAD_LINES,
            token_digits: TOKEN_DIGITS,
            global_max: GLOBAL_MAX,
            decode: DecodeRules::default(),
        }
    }
}

impl ExtractorSettings {
    /// Custom subject table; everything else keeps the defaults.
    /// `anchor_count` is capped at the number of subjects.
    pub fn with_subjects(subjects: Vec<Subject>) -> Self {
        let anchor_count = ANCHOR_COUNT.min(subjects.len());
        Self { subjects, anchor_count, ..Self::default() }
    }

    pub fn anchor_count(mut self, n: usize) -> Self {
        self.anchor_count = n.min(self.subjects.len());
        self
    }

    pub fn lookahead_lines(mut self, n: usize) -> Self {
        self.lookahead_lines = n;
        self
    }

    pub fn token_digits(mut self, digits: RangeInclusive<usize>) -> Self {
        self.token_digits = digits;
        self
    }

    pub fn global_max(mut self, max: u16) -> Self {
        self.global_max = max;
        self
    }

    pub fn decode_rules(mut self, rules: DecodeRules) -> Self {
        self.decode = rules;
        self
    }

    pub fn subjects(&self) -> &[Subject] { &self.subjects }

    /// Anchors that identify the header line (first `anchor_count` subjects).
    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().take(self.anchor_count).map(|s| s.anchor.as_str())
    }

    pub fn lookahead(&self) -> usize { self.lookahead_lines }
    pub fn digits(&self) -> &RangeInclusive<usize> { &self.token_digits }
    pub fn global_limit(&self) -> u16 { self.global_max }
    pub fn rules(&self) -> &DecodeRules { &self.decode }

    /// Candidates a score line must yield before it is accepted.
    pub fn required_candidates(&self) -> usize { self.subjects.len() }
}
