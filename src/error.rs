// src/error.rs
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("{path}: no header row with column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{0}: no student rows found")]
    EmptyRoster(PathBuf),

    #[error("unsupported document type: {0}")]
    UnsupportedDocument(PathBuf),

    #[error("{0}: PDF support not compiled in (enable the `pdf` feature)")]
    PdfSupportDisabled(PathBuf),

    #[error("{path}: PDF text extraction failed: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("invalid score pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
