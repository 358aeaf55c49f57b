// src/config/consts.rs
use std::ops::RangeInclusive;

// Saber 11 subjects: (column name, header-line anchor)
pub const SABER11_SUBJECTS: [(&str, &str); 5] = [
    ("Lectura Crítica", "Lectura"),
    ("Matemáticas", "Matemáticas"),
    ("Sociales y Ciudadanas", "Sociales"),
    ("Ciencias Naturales", "Ciencias Naturales"),
    ("Inglés", "Inglés"),
];
pub const GLOBAL_COLUMN: &str = "Puntaje Global";

// Extraction
pub const ANCHOR_COUNT: usize = 3;
pub const LOOKAHEAD_LINES: usize = 3;
pub const TOKEN_DIGITS: RangeInclusive<usize> = 2..=6;
pub const SUBJECT_MAX: u8 = 100;
pub const GLOBAL_MAX: u16 = 500;

// Roster / results columns
pub const COL_GROUP: &str = "Grupo";
pub const COL_FIRST_SURNAME: &str = "Primer Apellido";
pub const COL_SECOND_SURNAME: &str = "Segundo Apellido";
pub const COL_FIRST_NAME: &str = "Primer Nombre";
pub const COL_SECOND_NAME: &str = "Segundo Nombre";
pub const COL_DOC_TYPE: &str = "Tipo documento";
pub const COL_DOC_NUMBER: &str = "Número de documento";

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const DEFAULT_DOCS_DIR: &str = "pdfs_descargados";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "resultados";
pub const DEBUG_PREFIX: &str = "debug_";

// Downloads may carry "_1".."_9" suffixes
pub const MAX_DOWNLOAD_SUFFIX: u32 = 9;
pub const FILENAME_INVALID: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

// Report
pub const TOP_QUANTILE: f64 = 0.90;
pub const BOTTOM_QUANTILE: f64 = 0.20;
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
pub const DEFAULT_TOP_N: usize = 10;
