// src/batch.rs
//
// Per-student pipeline over a roster:
//   locate document → read first-page text → extract → record row
// Students run sequentially in roster order. A missing or unreadable
// document skips the student; an all-absent record still yields a row.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::options::BatchOptions;
use crate::error::Result;
use crate::extract::ScoreExtractor;
use crate::file::write_debug_text;
use crate::locate::DocIndex;
use crate::progress::Progress;
use crate::results::ResultRow;
use crate::roster::Student;
use crate::source::read_text;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No `<stem>.<ext>` (or re-download) in the documents directory.
    DocumentNotFound { expected: String },
    /// The document exists but its text could not be read.
    Unreadable { path: PathBuf, message: String },
    /// Text was read but not a single score came out of it.
    NoScores { path: PathBuf },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::DocumentNotFound { expected } => write!(f, "document not found: {expected}"),
            FailureKind::Unreadable { path, message } => write!(f, "{}: {message}", path.display()),
            FailureKind::NoScores { path } => write!(f, "{}: no scores extracted", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub student: Student,
    pub kind: FailureKind,
}

#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub rows: Vec<ResultRow>,
    pub failures: Vec<Failure>,
    pub complete: usize,
    pub partial: usize,
    pub debug_files: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize { self.rows.len() }
}

pub fn run(
    roster: &[Student],
    extractor: &ScoreExtractor,
    opts: &BatchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<BatchSummary> {
    let students = match opts.limit {
        Some(n) => &roster[..n.min(roster.len())],
        None => roster,
    };

    let ext = opts.doc_kind.ext();
    let index = DocIndex::scan(&opts.docs_dir, ext)?;
    info!(
        "Batch: {} students, {} .{} documents in {}",
        students.len(), index.len(), ext, opts.docs_dir.display()
    );

    if let Some(p) = progress.as_deref_mut() {
        p.begin(students.len());
    }

    let mut summary = BatchSummary::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (i, st) in students.iter().enumerate() {
        let name = st.listing_name();

        let Some(path) = index.find(st) else {
            let expected = crate::locate::expected_file_name(st, ext);
            warn!("Batch: [{}] {} - document not found ({})", i + 1, name, expected);
            fail(&mut summary, &mut progress, i, st, FailureKind::DocumentNotFound { expected });
            continue;
        };

        let text = match read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Batch: [{}] {} - {}", i + 1, name, e);
                let kind = FailureKind::Unreadable { path, message: e.to_string() };
                fail(&mut summary, &mut progress, i, st, kind);
                continue;
            }
        };

        let record = extractor.extract(&text);
        let missing = record.missing_fields();

        if record.is_complete() {
            summary.complete += 1;
        } else {
            summary.partial += 1;
            warn!("Batch: [{}] {} - missing {}", i + 1, name, missing.join(", "));
            if let Some(dir) = &opts.debug_dir {
                match write_debug_text(dir, &name, &text, &mut seen) {
                    Ok(dump) => {
                        info!("Batch: raw text saved to {}", dump.display());
                        summary.debug_files.push(dump);
                    }
                    Err(e) => warn!("Batch: [{}] {} - raw text not saved: {}", i + 1, name, e),
                }
            }
        }

        if record.is_empty() {
            summary.failures.push(Failure {
                student: st.clone(),
                kind: FailureKind::NoScores { path },
            });
        }

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i, &name, &missing);
        }
        summary.rows.push(ResultRow { student: st.clone(), record });
    }

    info!(
        "Batch: done ({} complete, {} partial, {} failures)",
        summary.complete, summary.partial, summary.failures.len()
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

fn fail(
    summary: &mut BatchSummary,
    progress: &mut Option<&mut dyn Progress>,
    index: usize,
    st: &Student,
    kind: FailureKind,
) {
    if let Some(p) = progress.as_deref_mut() {
        p.item_failed(index, &st.listing_name(), &kind.to_string());
    }
    summary.failures.push(Failure { student: st.clone(), kind });
}
