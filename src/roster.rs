// src/roster.rs
//
// Student identity records, read from the institution's registration
// export (spreadsheet or CSV/TSV). Scores never come from here.

use std::path::Path;

use tracing::{debug, info};

use crate::config::consts::*;
use crate::core::sanitize::{clean_cell, normalize_doc_number, normalize_ws};
use crate::error::{Error, Result};
use crate::table::Table;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Student {
    pub group: Option<String>,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub first_name: String,
    pub second_name: Option<String>,
    pub doc_type: String,
    pub doc_number: String,
}

impl Student {
    /// "Names Surnames", single-spaced.
    pub fn full_name(&self) -> String {
        let parts = [
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
            Some(self.first_surname.as_str()),
            self.second_surname.as_deref(),
        ];
        normalize_ws(&parts.into_iter().flatten().collect::<Vec<_>>().join(" "))
    }

    /// "Surnames Names", the order used in listings and debug file names.
    pub fn listing_name(&self) -> String {
        let parts = [
            Some(self.first_surname.as_str()),
            self.second_surname.as_deref(),
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
        ];
        normalize_ws(&parts.into_iter().flatten().collect::<Vec<_>>().join(" "))
    }

    /// Cells in export order (see `results::identity_headers`).
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.group.clone().unwrap_or_default(),
            self.first_surname.clone(),
            self.second_surname.clone().unwrap_or_default(),
            self.first_name.clone(),
            self.second_name.clone().unwrap_or_default(),
            self.doc_type.clone(),
            self.doc_number.clone(),
        ]
    }
}

/// Column positions of the identity fields in a loaded table.
pub(crate) struct IdentityColumns {
    group: Option<usize>,
    first_surname: usize,
    second_surname: Option<usize>,
    first_name: usize,
    second_name: Option<usize>,
    doc_type: usize,
    doc_number: usize,
}

impl IdentityColumns {
    pub(crate) fn resolve(table: &Table, path: &Path) -> Result<Self> {
        Ok(Self {
            group: table.column(COL_GROUP),
            first_surname: table.require(COL_FIRST_SURNAME, path)?,
            second_surname: table.column(COL_SECOND_SURNAME),
            first_name: table.require(COL_FIRST_NAME, path)?,
            second_name: table.column(COL_SECOND_NAME),
            doc_type: table.require(COL_DOC_TYPE, path)?,
            doc_number: table.require(COL_DOC_NUMBER, path)?,
        })
    }

    /// None for rows without a document number (separators, footers).
    pub(crate) fn student(&self, row: &[String]) -> Option<Student> {
        let cell = |col: Option<usize>| clean_cell(Table::cell(row, col));

        let doc_number = cell(Some(self.doc_number)).map(|d| normalize_doc_number(&d))?;
        Some(Student {
            group: cell(self.group),
            first_surname: cell(Some(self.first_surname)).unwrap_or_default(),
            second_surname: cell(self.second_surname),
            first_name: cell(Some(self.first_name)).unwrap_or_default(),
            second_name: cell(self.second_name),
            doc_type: cell(Some(self.doc_type)).unwrap_or_default(),
            doc_number,
        })
    }
}

/// Load the roster. The header row is the first one naming "Primer Apellido".
pub fn load(path: &Path) -> Result<Vec<Student>> {
    info!("Roster: loading {}", path.display());
    let table = Table::load(path, COL_FIRST_SURNAME)?;
    let students = from_table(&table, path)?;
    info!("Roster: {} students", students.len());
    Ok(students)
}

pub fn from_table(table: &Table, path: &Path) -> Result<Vec<Student>> {
    let cols = IdentityColumns::resolve(table, path)?;

    let mut students = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        match cols.student(row) {
            Some(st) => students.push(st),
            None => debug!("Roster: row {} skipped (no document number)", i + 1),
        }
    }

    if students.is_empty() {
        return Err(Error::EmptyRoster(path.to_path_buf()));
    }
    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            group: Some(s!("11A")),
            first_surname: s!("PÉREZ"),
            second_surname: Some(s!("GÓMEZ")),
            first_name: s!("ANA"),
            second_name: None,
            doc_type: s!("TI"),
            doc_number: s!("1000123"),
        }
    }

    #[test]
    fn full_name_skips_missing_parts() {
        assert_eq!(student().full_name(), "ANA PÉREZ GÓMEZ");
    }

    #[test]
    fn listing_name_puts_surnames_first() {
        assert_eq!(student().listing_name(), "PÉREZ GÓMEZ ANA");
    }

    #[test]
    fn cells_keep_empty_slots() {
        let cells = student().to_cells();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[4], "");
        assert_eq!(cells[6], "1000123");
    }
}
