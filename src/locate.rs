// src/locate.rs
//
// Maps students to their downloaded result documents.
// Downloads are named SURNAME1_SURNAME2_NAME1[_NAME2]_DOCNUMBER.<ext>; a
// re-download may add "_1", "_2", ... before the extension.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::consts::MAX_DOWNLOAD_SUFFIX;
use crate::core::sanitize::replace_invalid_filename_chars;
use crate::error::{Error, Result};
use crate::roster::Student;

/// File stem (no extension) the downloader gives this student's document.
pub fn expected_stem(st: &Student) -> String {
    let upper = |s: &str| s.trim().to_uppercase();

    let mut parts = vec![upper(&st.first_surname)];
    if let Some(s) = &st.second_surname { parts.push(upper(s)); }
    parts.push(upper(&st.first_name));
    if let Some(s) = &st.second_name { parts.push(upper(s)); }
    parts.push(st.doc_number.trim().to_string());

    replace_invalid_filename_chars(&parts.join("_"))
}

pub fn expected_file_name(st: &Student, ext: &str) -> String {
    join!(&expected_stem(st), ".", ext)
}

/// Documents with one extension in one directory, sorted by name.
#[derive(Clone, Debug)]
pub struct DocIndex {
    dir: PathBuf,
    ext: String,
    names: Vec<String>,
}

impl DocIndex {
    /// A missing directory scans as empty.
    pub fn scan(dir: &Path, ext: &str) -> Result<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        let mut names = Vec::new();

        if dir.exists() {
            let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
            for entry in entries {
                let path = entry.map_err(|e| Error::io(dir, e))?.path();
                if !path.is_file() { continue; }
                let matches_ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(&ext));
                if !matches_ext { continue; }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        } else {
            warn!("Documents directory not found: {}", dir.display());
        }

        names.sort();
        debug!("DocIndex: {} .{} files in {}", names.len(), ext, dir.display());
        Ok(Self { dir: dir.to_path_buf(), ext, names })
    }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    /// Exact name first, then the first "<stem>_<N>" re-download.
    pub fn find(&self, st: &Student) -> Option<PathBuf> {
        let stem = expected_stem(st);
        let exact = join!(&stem, ".", &self.ext);

        let hit = self.names
            .iter()
            .find(|n| eq_name(n, &exact))
            .or_else(|| self.names.iter().find(|n| self.is_suffixed(n, &stem)))?;
        Some(self.dir.join(hit))
    }

    /// "<stem>_<digits>.<ext>", any case.
    fn is_suffixed(&self, name: &str, stem: &str) -> bool {
        let (name, stem) = (name.to_lowercase(), stem.to_lowercase());
        let Some(rest) = name.strip_prefix(stem.as_str()).and_then(|r| r.strip_prefix('_')) else {
            return false;
        };
        let Some(dot) = rest.rfind('.') else { return false; };
        let (num, ext) = (&rest[..dot], &rest[dot + 1..]);
        !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) && ext.eq_ignore_ascii_case(&self.ext)
    }

    /// Which students have a document, which don't, and which files match nobody.
    pub fn verify(&self, roster: &[Student]) -> VerifyReport {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        let mut known: HashSet<String> = HashSet::new();

        for st in roster {
            let stem = expected_stem(st);
            known.insert(join!(&stem, ".", &self.ext).to_lowercase());
            for i in 1..=MAX_DOWNLOAD_SUFFIX {
                known.insert(format!("{stem}_{i}.{}", self.ext).to_lowercase());
            }

            match self.find(st) {
                Some(path) => found.push((st.clone(), path)),
                None => missing.push(st.clone()),
            }
        }

        let extra = self.names
            .iter()
            .filter(|n| !known.contains(&n.to_lowercase()))
            .cloned()
            .collect();

        VerifyReport { found, missing, extra }
    }
}

fn eq_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[derive(Clone, Debug, Default)]
pub struct VerifyReport {
    pub found: Vec<(Student, PathBuf)>,
    pub missing: Vec<Student>,
    /// File names that belong to no roster student.
    pub extra: Vec<String>,
}

impl VerifyReport {
    pub fn is_complete(&self) -> bool { self.missing.is_empty() }
}
