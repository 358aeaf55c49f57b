// src/source.rs
//
// Text to feed the extractor. Scores live on the first page of the result
// document, so only that page is returned.
//   .txt → OCR dump, whole file (already one page)
//   .pdf → text layer of page 1 (feature "pdf")

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

pub fn read_text(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => {
            let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
            debug!("Source: {} ({} bytes)", path.display(), bytes.len());
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        "pdf" => read_pdf_first_page(path),
        _ => Err(Error::UnsupportedDocument(path.to_path_buf())),
    }
}

#[cfg(feature = "pdf")]
fn read_pdf_first_page(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| Error::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!("Source: {} ({} pages)", path.display(), pages.len());
    Ok(pages.into_iter().next().unwrap_or_default())
}

#[cfg(not(feature = "pdf"))]
fn read_pdf_first_page(path: &Path) -> Result<String> {
    Err(Error::PdfSupportDisabled(path.to_path_buf()))
}
