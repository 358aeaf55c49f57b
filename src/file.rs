// src/file.rs

use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::DEBUG_PREFIX;
use crate::config::options::ExportOptions;
use crate::core::sanitize::name_to_stem;
use crate::csv::{write_row, Delim};
use crate::error::{Error, Result};

/// Write one export file based on ExportOptions (path, headers policy, delimiter).
/// Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<PathBuf> {
    let path = export.out_path();
    ensure_parent(&path)?;

    let file = File::create(&path).map_err(|e| Error::io(&path, e))?; // truncate/overwrite
    let headers = export.include_headers.then_some(headers);
    write_table(BufWriter::new(file), headers, rows, export.format.delim())
        .map_err(|e| Error::io(&path, e))?;

    Ok(path)
}

fn write_table<W: Write>(
    mut out: W,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    delim: Delim,
) -> std::io::Result<()> {
    if let Some(h) = headers {
        write_row(&mut out, h, delim)?;
    }
    for row in rows {
        write_row(&mut out, row, delim)?;
    }
    out.flush()
}

/// Dump the raw text of an incomplete extraction as `debug_<Name>.txt`.
/// Same-name students within one run get "(2)", "(3)", ... suffixes.
pub fn write_debug_text(
    dir: &Path,
    student_name: &str,
    text: &str,
    seen: &mut HashMap<String, usize>,
) -> Result<PathBuf> {
    ensure_directory(dir)?;
    let stem = join!(DEBUG_PREFIX, &name_to_stem(student_name));
    let path = resolve_unique_filename(dir, &stem, seen, "txt");
    fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// `<stem>.<ext>` the first time a stem is seen in this run, then
/// `<stem> (2).<ext>`, `<stem> (3).<ext>`, ... Files from earlier runs are
/// overwritten.
pub fn resolve_unique_filename(
    dir: &Path,
    stem: &str,
    seen_names: &mut HashMap<String, usize>,
    ext: &str,
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}
