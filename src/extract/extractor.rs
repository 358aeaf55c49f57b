// src/extract/extractor.rs
use regex::Regex;

use crate::error::Error;
use super::record::{ScoreRecord, SubjectScore};
use super::settings::ExtractorSettings;

/// Best-effort score extractor for OCR text of a result page.
///
/// Construction compiles the patterns once; [`ScoreExtractor::extract`] is
/// then a pure function and the extractor can be shared across threads.
#[derive(Clone, Debug)]
pub struct ScoreExtractor {
    settings: ExtractorSettings,
    global: Regex,
    token: Regex,
}

impl Default for ScoreExtractor {
    /// The default patterns are `([0-9]{1,3})/500` and `[0-9]{2,6}`; neither
    /// can fail to compile, so this never panics.
    fn default() -> Self {
        Self::new(ExtractorSettings::default()).expect("default score patterns compile")
    }
}

impl ScoreExtractor {
    pub fn new(settings: ExtractorSettings) -> Result<Self, Error> {
        // "245/500": 1-3 digits glued to the denominator. ASCII digits only,
        // matching what `parse` accepts.
        let global = Regex::new(&format!(r"([0-9]{{1,3}})/{}", settings.global_limit()))?;

        let digits = settings.digits();
        let lo = (*digits.start()).max(1);
        let hi = (*digits.end()).max(lo);
        let token = Regex::new(&format!(r"[0-9]{{{lo},{hi}}}"))?;

        Ok(Self { settings, global, token })
    }

    pub fn settings(&self) -> &ExtractorSettings { &self.settings }

    /// Extract all six fields. Never fails; unrecoverable fields are `None`.
    pub fn extract(&self, text: &str) -> ScoreRecord {
        let global = self.global_score(text);
        let scores = self.subject_line(text).unwrap_or_default();

        let subjects = self.settings
            .subjects()
            .iter()
            .enumerate()
            .map(|(i, s)| SubjectScore { subject: s.name.clone(), score: scores.get(i).copied() })
            .collect();

        ScoreRecord::from_parts(global, subjects)
    }

    /// First "<n>/500" in the text. An out-of-range first match is dropped,
    /// later matches are not consulted.
    pub fn global_score(&self, text: &str) -> Option<u16> {
        let caps = self.global.captures(text)?;
        let value: u16 = caps.get(1)?.as_str().parse().ok()?;
        (value <= self.settings.global_limit()).then_some(value)
    }

    /// Decoded scores of the first qualifying line below the header line,
    /// truncated to one per subject.
    fn subject_line(&self, text: &str) -> Option<Vec<u8>> {
        let need = self.settings.required_candidates();
        if need == 0 { return None; }

        let lines: Vec<&str> = text.lines().collect();
        let header = lines
            .iter()
            .position(|line| self.settings.anchors().all(|a| line.contains(a)))?;

        lines
            .iter()
            .skip(header + 1)
            .take(self.settings.lookahead())
            .find_map(|line| self.decode_line(line, need))
    }

    fn decode_line(&self, line: &str, need: usize) -> Option<Vec<u8>> {
        let tokens: Vec<&str> = self.token.find_iter(line).map(|m| m.as_str()).collect();
        if tokens.len() < need { return None; }

        let rules = self.settings.rules();
        let candidates: Vec<u8> = tokens
            .into_iter()
            .filter_map(|t| rules.decode_str(t))
            .collect();

        (candidates.len() >= need).then(|| candidates.into_iter().take(need).collect())
    }
}
