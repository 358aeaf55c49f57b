// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::csv::Delim;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub batch: BatchOptions,
    pub export: ExportOptions,
}

/// What kind of file holds each student's result page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocKind {
    #[default]
    Pdf,
    Text,
}

impl DocKind {
    pub fn ext(&self) -> &'static str {
        match self { DocKind::Pdf => "pdf", DocKind::Text => "txt" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    pub docs_dir: PathBuf,
    pub doc_kind: DocKind,
    /// Raw text of incomplete extractions goes here (None = don't dump).
    pub debug_dir: Option<PathBuf>,
    /// Only the first N students (quick trial run).
    pub limit: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            doc_kind: DocKind::Pdf,
            debug_dir: None,
            limit: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> Delim {
        match self { ExportFormat::Csv => Delim::Csv, ExportFormat::Tsv => Delim::Tsv }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// Final file path. A user-typed extension wins; a bare stem gets the
    /// format's extension.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        match &self.out_path.ext {
            Some(ext) => {
                let mut name = self.out_path.file_stem.clone();
                name.push(".");
                name.push(ext);
                path.push(name);
            }
            None => {
                let stem = self.out_path.file_stem.to_string_lossy();
                path.push(join!(&*stem, ".", self.format.ext()));
            }
        }
        path
    }

    /// Parse user text into dir + stem (+ explicit extension, if any).
    /// A trailing separator means "directory, default file name".
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() { return; }

        let p = Path::new(s);
        if crate::file::looks_like_dir_hint(p) || p.is_dir() {
            self.out_path = OutputPath { dir: p.to_path_buf(), ..OutputPath::default() };
            return;
        }

        self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
