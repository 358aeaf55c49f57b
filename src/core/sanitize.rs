// src/core/sanitize.rs
use crate::config::consts::FILENAME_INVALID;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Replace characters Windows/Unix refuse in file names with '_'.
pub fn replace_invalid_filename_chars(name: &str) -> String {
    name.chars()
        .map(|c| if FILENAME_INVALID.contains(&c) { '_' } else { c })
        .collect()
}

/// Spreadsheet cell → trimmed text; pandas-style "nan"/"none" count as empty.
pub fn clean_cell(s: &str) -> Option<String> {
    let t = normalize_ws(s);
    if t.is_empty() || t.eq_ignore_ascii_case("nan") || t.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(t)
    }
}

/// Document numbers come out of spreadsheets as floats ("1000123.0",
/// "1.000123E9"). Integral values are rendered without decimals; anything
/// else is kept as typed.
pub fn normalize_doc_number(s: &str) -> String {
    let t = s.trim();
    if t.chars().all(|c| c.is_ascii_digit()) {
        return t.to_string();
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < 1e15 => {
            format!("{}", v as u64)
        }
        _ => t.to_string(),
    }
}

/// Header comparison key: whitespace collapsed, lowercase.
pub fn header_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// "Ana María Pérez" → "Ana_María_Pérez", safe as a file stem.
pub fn name_to_stem(name: &str) -> String {
    replace_invalid_filename_chars(&normalize_ws(name).replace(' ', "_"))
}
