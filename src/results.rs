// src/results.rs
//
// Consolidated results: one row per student, identity first, then the five
// subject scores and the global score.

use std::path::Path;

use tracing::{debug, info};

use crate::config::consts::*;
use crate::core::sanitize::{clean_cell, normalize_doc_number};
use crate::error::{Error, Result};
use crate::extract::{ExtractorSettings, ScoreRecord};
use crate::roster::Student;
use crate::table::Table;

pub fn identity_headers() -> Vec<String> {
    [COL_GROUP, COL_FIRST_SURNAME, COL_SECOND_SURNAME, COL_FIRST_NAME,
     COL_SECOND_NAME, COL_DOC_TYPE, COL_DOC_NUMBER]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Score column names in export order: subjects, then global.
pub fn score_headers(settings: &ExtractorSettings) -> Vec<String> {
    let mut h: Vec<String> = settings.subjects().iter().map(|s| s.name.clone()).collect();
    h.push(s!(GLOBAL_COLUMN));
    h
}

pub fn headers(settings: &ExtractorSettings) -> Vec<String> {
    let mut h = identity_headers();
    h.extend(score_headers(settings));
    h
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub student: Student,
    pub record: ScoreRecord,
}

impl ResultRow {
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = self.student.to_cells();
        cells.extend(self.record.to_cells());
        cells
    }
}

/* ---------------- Loading a consolidated file back ---------------- */

/// Which score a statistic is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Subject(usize),
    Global,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredStudent {
    pub name: String,
    pub group: Option<String>,
    pub doc_number: Option<String>,
    pub subjects: Vec<Option<f64>>,
    pub global: Option<f64>,
}

impl ScoredStudent {
    pub fn score(&self, field: Field) -> Option<f64> {
        match field {
            Field::Subject(i) => self.subjects.get(i).copied().flatten(),
            Field::Global => self.global,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub subjects: Vec<String>,
    pub students: Vec<ScoredStudent>,
}

impl ResultSet {
    /// Subjects in order, then global.
    pub fn fields(&self) -> Vec<Field> {
        let mut f: Vec<Field> = (0..self.subjects.len()).map(Field::Subject).collect();
        f.push(Field::Global);
        f
    }

    pub fn field_name(&self, field: Field) -> &str {
        match field {
            Field::Subject(i) => self.subjects.get(i).map(String::as_str).unwrap_or("?"),
            Field::Global => GLOBAL_COLUMN,
        }
    }

    pub fn values(&self, field: Field) -> Vec<f64> {
        self.students.iter().filter_map(|s| s.score(field)).collect()
    }

    pub fn len(&self) -> usize { self.students.len() }
    pub fn is_empty(&self) -> bool { self.students.is_empty() }

    /// Build from freshly extracted rows (no file round trip).
    pub fn from_rows(settings: &ExtractorSettings, rows: &[ResultRow]) -> Self {
        let subjects = settings.subjects().iter().map(|s| s.name.clone()).collect();
        let students = rows
            .iter()
            .map(|r| ScoredStudent {
                name: r.student.full_name(),
                group: r.student.group.clone(),
                doc_number: Some(r.student.doc_number.clone()),
                subjects: r.record.subject_scores().iter().map(|s| s.score.map(f64::from)).collect(),
                global: r.record.global_score().map(f64::from),
            })
            .collect();
        Self { subjects, students }
    }
}

/// Load a consolidated results file (CSV/TSV/spreadsheet). The header row is
/// the first one naming the global column. Rows without a document number
/// (blank separators, "Promedio" footers) are ignored when that column exists.
pub fn load(path: &Path, settings: &ExtractorSettings) -> Result<ResultSet> {
    info!("Results: loading {}", path.display());
    let table = Table::load(path, GLOBAL_COLUMN)?;

    let subject_cols: Vec<usize> = settings
        .subjects()
        .iter()
        .map(|s| table.require(&s.name, path))
        .collect::<Result<_>>()?;
    let global_col = table.require(GLOBAL_COLUMN, path)?;

    let doc_col = table.column(COL_DOC_NUMBER);
    let group_col = table.column(COL_GROUP);
    let name_cols: Vec<Option<usize>> = [COL_FIRST_NAME, COL_SECOND_NAME, COL_FIRST_SURNAME, COL_SECOND_SURNAME]
        .iter()
        .map(|c| table.column(c))
        .collect();

    let mut students = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        let cell = |col: Option<usize>| clean_cell(Table::cell(row, col));

        let doc_number = cell(doc_col).map(|d| normalize_doc_number(&d));
        let name = name_cols.iter().filter_map(|c| cell(*c)).collect::<Vec<_>>().join(" ");

        let keep = if doc_col.is_some() { doc_number.is_some() } else { !name.is_empty() };
        if !keep {
            debug!("Results: row {} skipped (no student identity)", i + 1);
            continue;
        }

        students.push(ScoredStudent {
            name,
            group: cell(group_col),
            doc_number,
            subjects: subject_cols
                .iter()
                .map(|c| parse_score(Table::cell(row, Some(*c)), f64::from(SUBJECT_MAX)))
                .collect(),
            global: parse_score(Table::cell(row, Some(global_col)), f64::from(GLOBAL_MAX)),
        });
    }

    if students.is_empty() {
        return Err(Error::EmptyRoster(path.to_path_buf()));
    }
    info!("Results: {} students", students.len());

    let subjects = settings.subjects().iter().map(|s| s.name.clone()).collect();
    Ok(ResultSet { subjects, students })
}

/// "57", "57.0", "57,5" → value; blanks and out-of-range values → None.
fn parse_score(cell: &str, max: f64) -> Option<f64> {
    let v: f64 = clean_cell(cell)?.replace(',', ".").parse().ok()?;
    (v.is_finite() && (0.0..=max).contains(&v)).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score_accepts_decimal_comma_and_rejects_out_of_range() {
        assert_eq!(parse_score("57,5", 100.0), Some(57.5));
        assert_eq!(parse_score(" 245 ", 500.0), Some(245.0));
        assert_eq!(parse_score("501", 500.0), None);
        assert_eq!(parse_score("nan", 100.0), None);
        assert_eq!(parse_score("", 100.0), None);
    }
}
