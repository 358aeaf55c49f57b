// src/extract/record.rs
use crate::config::consts::GLOBAL_COLUMN;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectScore {
    pub subject: String,
    pub score: Option<u8>,
}

/// Scores recovered from one result page.
/// Built once by the extractor; read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRecord {
    global: Option<u16>,
    subjects: Vec<SubjectScore>,
}

impl ScoreRecord {
    pub(crate) fn from_parts(global: Option<u16>, subjects: Vec<SubjectScore>) -> Self {
        Self { global, subjects }
    }

    pub fn global_score(&self) -> Option<u16> { self.global }

    /// Subject scores in canonical order.
    pub fn subject_scores(&self) -> &[SubjectScore] { &self.subjects }

    pub fn subject(&self, name: &str) -> Option<u8> {
        self.subjects
            .iter()
            .find(|s| s.subject == name)
            .and_then(|s| s.score)
    }

    /// Names of absent fields: subjects first, then the global column.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut out: Vec<String> = self.subjects
            .iter()
            .filter(|s| s.score.is_none())
            .map(|s| s.subject.clone())
            .collect();
        if self.global.is_none() {
            out.push(s!(GLOBAL_COLUMN));
        }
        out
    }

    pub fn is_complete(&self) -> bool {
        self.global.is_some() && self.subjects.iter().all(|s| s.score.is_some())
    }

    /// Nothing recovered at all; callers treat this as a soft failure.
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.subjects.iter().all(|s| s.score.is_none())
    }

    /// Cells in export order: subjects, then global. Absent → empty cell.
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells: Vec<String> = self.subjects
            .iter()
            .map(|s| s.score.map(|v| v.to_string()).unwrap_or_default())
            .collect();
        cells.push(self.global.map(|v| v.to_string()).unwrap_or_default());
        cells
    }
}
