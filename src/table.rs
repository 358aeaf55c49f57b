// src/table.rs
//
// Loads a tabular file (spreadsheet or CSV/TSV) into plain string rows and
// finds the header row by name. Roster exports from the portal carry a few
// banner rows above the header, so the header is searched for rather than
// assumed to be row 0.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::core::sanitize::header_key;
use crate::csv::{parse_rows, Delim};
use crate::error::{Error, Result};

const SPREADSHEET_EXTS: [&str; 5] = ["xls", "xlsx", "xlsm", "xlsb", "ods"];

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SPREADSHEET_EXTS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// All rows of the first worksheet (or the delimited file) as text cells.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    if is_spreadsheet(path) {
        let mut workbook = open_workbook_auto(path)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Ok(Vec::new()),
        };
        Ok(range.rows().map(|row| row.iter().map(cell_text).collect()).collect())
    } else {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(parse_rows(&text, Delim::from_path(path)))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => s!(),
        Data::String(s) => s.clone(),
        // Whole numbers are stored as floats; "57.0" should read as "57"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Rows below a detected header, addressable by column name.
#[derive(Clone, Debug)]
pub struct Table {
    columns: HashMap<String, usize>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Use the first row that has a cell equal to `marker` (trimmed,
    /// case-insensitive) as the header.
    pub fn from_rows(mut rows: Vec<Vec<String>>, marker: &str, path: &Path) -> Result<Self> {
        let key = header_key(marker);
        let header_ix = rows
            .iter()
            .position(|r| r.iter().any(|c| header_key(c) == key))
            .ok_or_else(|| Error::MissingColumn {
                path: path.to_path_buf(),
                column: s!(marker),
            })?;

        let data = rows.split_off(header_ix + 1);
        let headers = rows.pop().unwrap_or_default();
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (header_key(h), i))
            .fold(HashMap::new(), |mut m, (k, i)| {
                m.entry(k).or_insert(i); // first occurrence wins
                m
            });

        Ok(Self { columns, headers, rows: data })
    }

    pub fn load(path: &Path, marker: &str) -> Result<Self> {
        Self::from_rows(load_rows(path)?, marker, path)
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(&header_key(name)).copied()
    }

    pub fn require(&self, name: &str, path: &Path) -> Result<usize> {
        self.column(name).ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: s!(name),
        })
    }

    /// Cell text by column index; short rows read as empty.
    pub fn cell<'a>(row: &'a [String], col: Option<usize>) -> &'a str {
        col.and_then(|c| row.get(c)).map(String::as_str).unwrap_or("")
    }
}
