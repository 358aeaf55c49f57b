// tests/export_options.rs
//
// ExportOptions path/extension logic and the debug dump naming.
//
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use icfes_scores::config::options::{ExportFormat, ExportOptions};
use icfes_scores::file::{resolve_unique_filename, write_debug_text, write_export};

#[test]
fn default_path_follows_format() {
    let mut opts = ExportOptions::default();
    assert_eq!(opts.out_path(), Path::new("out").join("resultados.csv"));

    opts.format = ExportFormat::Tsv;
    assert_eq!(opts.out_path(), Path::new("out").join("resultados.tsv"));
}

#[test]
fn user_extension_survives_format_change() {
    let mut opts = ExportOptions::default();
    opts.set_path("reports/icfes_2025.txt");
    opts.format = ExportFormat::Tsv;
    assert_eq!(opts.out_path(), Path::new("reports").join("icfes_2025.txt"));
}

#[test]
fn directory_hint_keeps_default_file_name() {
    let mut opts = ExportOptions::default();
    opts.set_path("reports/");
    assert_eq!(opts.out_path(), Path::new("reports/").join("resultados.csv"));

    // blank input leaves the path alone
    opts.set_path("   ");
    assert_eq!(opts.out_path(), Path::new("reports/").join("resultados.csv"));
}

#[test]
fn export_without_headers() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = ExportOptions::default();
    opts.include_headers = false;
    opts.set_path(dir.path().join("nested").join("r").to_str().unwrap());

    let headers = vec!["Grupo".to_string(), "Puntaje Global".to_string()];
    let rows = vec![vec!["11A".to_string(), "245".to_string()]];
    let path = write_export(&opts, &headers, &rows).unwrap();

    assert_eq!(fs::read_to_string(path).unwrap(), "11A,245\n");
}

#[test]
fn duplicate_names_get_numbered() {
    let dir = tempfile::tempdir().unwrap();
    let mut seen = HashMap::new();

    let a = write_debug_text(dir.path(), "PÉREZ ANA", "uno", &mut seen).unwrap();
    let b = write_debug_text(dir.path(), "PÉREZ  ANA", "dos", &mut seen).unwrap();

    assert_eq!(a.file_name().unwrap(), "debug_PÉREZ_ANA.txt");
    assert_eq!(b.file_name().unwrap(), "debug_PÉREZ_ANA (2).txt");
    assert_eq!(fs::read_to_string(b).unwrap(), "dos");

    let c = resolve_unique_filename(dir.path(), "debug_PÉREZ_ANA", &mut seen, "txt");
    assert!(c.to_string_lossy().ends_with("debug_PÉREZ_ANA (3).txt"));
}
