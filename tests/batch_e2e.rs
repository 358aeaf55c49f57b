// tests/batch_e2e.rs
use std::fs;
use std::path::Path;

use icfes_scores::batch::{self, FailureKind};
use icfes_scores::config::options::{AppOptions, DocKind, ExportFormat};
use icfes_scores::file::write_export;
use icfes_scores::progress::{NullProgress, Progress};
use icfes_scores::results::{self, Field};
use icfes_scores::{roster, ScoreExtractor};

const ROSTER: &str = "\
Grupo\tPrimer Apellido\tSegundo Apellido\tPrimer Nombre\tSegundo Nombre\tTipo documento\tNúmero de documento
11A\tPÉREZ\tGÓMEZ\tANA\t\tTI\t1000123
11A\tRUIZ\t\tLUIS\t\tTI\t1000456
11B\tDÍAZ\tMORA\tJUAN\tPABLO\tTI\t1000789
11B\tLÓPEZ\t\tSOFÍA\t\tCC\t1000999
";

const HEADER: &str = "Lectura Crítica Matemáticas Sociales y Ciudadanas Ciencias Naturales Inglés";

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<(String, usize)>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, _index: usize, name: &str, missing: &[String]) {
        self.done.push((name.to_string(), missing.len()));
    }
    fn item_failed(&mut self, _index: usize, name: &str, _reason: &str) {
        self.failed.push(name.to_string());
    }
    fn finish(&mut self) { self.finished = true; }
}

fn setup(dir: &Path) -> AppOptions {
    fs::write(dir.join("roster.tsv"), ROSTER).unwrap();

    let docs = dir.join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(
        docs.join("PÉREZ_GÓMEZ_ANA_1000123.txt"),
        format!("Puntaje global\n245/500\n{HEADER}\n57100 52100 46100 44100 48100\n"),
    ).unwrap();
    // re-download suffix; global missing
    fs::write(docs.join("RUIZ_LUIS_1000456_1.txt"), format!("{HEADER}\n60 70 65 55 80\n")).unwrap();
    // nothing readable on the page
    fs::write(docs.join("DÍAZ_MORA_JUAN_PABLO_1000789.txt"), "pagina escaneada sin texto").unwrap();
    // LÓPEZ has no document

    let mut opts = AppOptions::default();
    opts.batch.docs_dir = docs;
    opts.batch.doc_kind = DocKind::Text;
    opts.batch.debug_dir = Some(dir.join("debug"));
    opts
}

#[test]
fn batch_consolidates_roster() {
    let dir = tempfile::tempdir().unwrap();
    let opts = setup(dir.path());
    let students = roster::load(&dir.path().join("roster.tsv")).unwrap();
    let ex = ScoreExtractor::default();

    let mut rec = Recorder::default();
    let summary = batch::run(&students, &ex, &opts.batch, Some(&mut rec)).unwrap();

    assert_eq!(rec.total, 4);
    assert!(rec.finished);
    assert_eq!(rec.failed, vec!["LÓPEZ SOFÍA".to_string()]);
    assert_eq!(rec.done.len(), 3);

    // three rows: complete, partial, all-absent
    assert_eq!(summary.processed(), 3);
    assert_eq!(summary.complete, 1);
    assert_eq!(summary.partial, 2);

    let first = &summary.rows[0];
    assert_eq!(first.record.global_score(), Some(245));
    assert_eq!(first.record.subject("Inglés"), Some(48));
    assert_eq!(summary.rows[1].record.subject("Matemáticas"), Some(70));
    assert!(summary.rows[2].record.is_empty());

    assert_eq!(summary.failures.len(), 2);
    assert!(matches!(summary.failures[0].kind, FailureKind::NoScores { .. }));
    assert!(matches!(summary.failures[1].kind, FailureKind::DocumentNotFound { .. }));

    // raw text kept for the two incomplete pages
    assert_eq!(summary.debug_files.len(), 2);
    let dump = dir.path().join("debug").join("debug_RUIZ_LUIS.txt");
    assert!(dump.exists());
    assert!(fs::read_to_string(dump).unwrap().contains("60 70 65 55 80"));
}

#[test]
fn batch_limit_processes_first_students_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = setup(dir.path());
    opts.batch.limit = Some(1);
    opts.batch.debug_dir = None;
    let students = roster::load(&dir.path().join("roster.tsv")).unwrap();

    let mut quiet = NullProgress;
    let summary = batch::run(&students, &ScoreExtractor::default(), &opts.batch, Some(&mut quiet)).unwrap();
    assert_eq!(summary.processed(), 1);
    assert!(summary.failures.is_empty());
    assert!(!dir.path().join("debug").exists());
}

#[test]
fn unwritable_debug_dir_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = setup(dir.path());
    // a regular file where the debug directory should be
    let blocker = dir.path().join("debug");
    fs::write(&blocker, "not a directory").unwrap();
    opts.batch.debug_dir = Some(blocker);
    let students = roster::load(&dir.path().join("roster.tsv")).unwrap();

    let summary = batch::run(&students, &ScoreExtractor::default(), &opts.batch, None).unwrap();
    assert_eq!(summary.processed(), 3);
    assert_eq!(summary.partial, 2);
    assert!(summary.debug_files.is_empty());
    assert_eq!(summary.rows[0].record.global_score(), Some(245));
}

#[test]
fn exported_results_load_back_for_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = setup(dir.path());
    let students = roster::load(&dir.path().join("roster.tsv")).unwrap();
    let ex = ScoreExtractor::default();
    let summary = batch::run(&students, &ex, &opts.batch, None).unwrap();

    opts.export.format = ExportFormat::Tsv;
    opts.export.set_path(dir.path().join("out").join("resultados").to_str().unwrap());

    let headers = results::headers(ex.settings());
    let rows: Vec<Vec<String>> = summary.rows.iter().map(|r| r.to_cells()).collect();
    let path = write_export(&opts.export, &headers, &rows).unwrap();
    assert!(path.to_string_lossy().ends_with("resultados.tsv"));

    let text = fs::read_to_string(&path).unwrap();
    let first_line = text.lines().next().unwrap();
    assert!(first_line.starts_with("Grupo\tPrimer Apellido"));
    assert!(first_line.ends_with("Inglés\tPuntaje Global"));

    let set = results::load(&path, ex.settings()).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.students[0].name, "ANA PÉREZ GÓMEZ");
    assert_eq!(set.students[0].global, Some(245.0));
    assert_eq!(set.students[1].global, None);
    assert_eq!(set.values(Field::Subject(0)), vec![57.0, 60.0]);
}
