// src/cli.rs
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, WrapErr};

use crate::batch;
use crate::config::consts::*;
use crate::config::options::{AppOptions, DocKind, ExportFormat};
use crate::csv::{rows_to_string, Delim};
use crate::extract::{ExtractorSettings, ScoreExtractor, ScoreRecord};
use crate::file::write_export;
use crate::locate::DocIndex;
use crate::progress::Progress;
use crate::results::{self, Field, ResultSet};
use crate::roster;
use crate::source::read_text;
use crate::stats::{self, FieldStats, Histogram};

#[derive(Parser, Debug)]
#[command(name = "icfes_scores")]
#[command(about = "Consolidate ICFES Saber 11 scores from result documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract the scores of one result document (.txt OCR dump or .pdf)
    Extract {
        file: PathBuf,

        #[arg(long, value_enum, default_value = "text")]
        format: ExtractFormat,
    },

    /// Extract every roster student's scores into one CSV/TSV file
    Batch {
        /// Roster spreadsheet or CSV/TSV
        #[arg(long)]
        roster: PathBuf,

        /// Directory with the downloaded result documents
        #[arg(long, default_value = DEFAULT_DOCS_DIR)]
        docs: PathBuf,

        /// Output file or directory (trailing '/' = directory)
        #[arg(short, long)]
        out: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: OutFormat,

        /// Document type to look for
        #[arg(long, value_enum, default_value = "pdf")]
        ext: DocExt,

        /// Save the raw text of incomplete extractions here
        #[arg(long)]
        debug_dir: Option<PathBuf>,

        /// Process only the first N students
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        no_headers: bool,
    },

    /// Check that every roster student has a downloaded document
    Verify {
        #[arg(long)]
        roster: PathBuf,

        #[arg(long, default_value = DEFAULT_DOCS_DIR)]
        docs: PathBuf,

        #[arg(long, value_enum, default_value = "pdf")]
        ext: DocExt,
    },

    /// Descriptive statistics of a consolidated results file
    Report {
        results: PathBuf,

        /// Rows shown in the ranking
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Histogram bins for the global score
        #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
        bins: usize,
    },

    /// Compare two consolidated results files (previous vs current)
    Compare {
        previous: PathBuf,
        current: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExtractFormat {
    Text,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutFormat {
    Csv,
    Tsv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocExt {
    Pdf,
    Txt,
}

impl From<OutFormat> for ExportFormat {
    fn from(f: OutFormat) -> Self {
        match f { OutFormat::Csv => ExportFormat::Csv, OutFormat::Tsv => ExportFormat::Tsv }
    }
}

impl From<DocExt> for DocKind {
    fn from(e: DocExt) -> Self {
        match e { DocExt::Pdf => DocKind::Pdf, DocExt::Txt => DocKind::Text }
    }
}

pub fn run() -> color_eyre::Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> color_eyre::Result<()> {
    let extractor = ScoreExtractor::default();

    match cli.command {
        Command::Extract { file, format } => extract_one(&extractor, &file, format),
        Command::Batch { roster, docs, out, format, ext, debug_dir, limit, no_headers } => {
            let mut opts = AppOptions::default();
            opts.batch.docs_dir = docs;
            opts.batch.doc_kind = ext.into();
            opts.batch.debug_dir = debug_dir;
            opts.batch.limit = limit;
            opts.export.format = format.into();
            opts.export.include_headers = !no_headers;
            if let Some(out) = out {
                opts.export.set_path(&out);
            }
            run_batch(&extractor, &roster, &opts)
        }
        Command::Verify { roster, docs, ext } => verify(&roster, &docs, DocKind::from(ext)),
        Command::Report { results, top, bins } => report(extractor.settings(), &results, top, bins),
        Command::Compare { previous, current } => compare(extractor.settings(), &previous, &current),
    }
}

/* ---------------- extract ---------------- */

fn extract_one(extractor: &ScoreExtractor, file: &Path, format: ExtractFormat) -> color_eyre::Result<()> {
    let text = read_text(file).wrap_err_with(|| format!("reading {}", file.display()))?;
    let record = extractor.extract(&text);

    match format {
        ExtractFormat::Text => print!("{}", describe(&record)),
        ExtractFormat::Csv => {
            let headers = results::score_headers(extractor.settings());
            print!("{}", rows_to_string(Some(&headers), &[record.to_cells()], Delim::Csv));
        }
    }
    Ok(())
}

fn describe(record: &ScoreRecord) -> String {
    let mut out = String::new();
    for s in record.subject_scores() {
        out.push_str(&format!("{:<24}{}\n", s.subject, show(s.score)));
    }
    out.push_str(&format!("{:<24}{}\n", GLOBAL_COLUMN, show(record.global_score())));
    out
}

fn show<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| s!("-"))
}

/* ---------------- batch ---------------- */

/// Prints one line per student to stderr.
struct CliProgress {
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Processing {total} students");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, index: usize, name: &str, missing: &[String]) {
        if missing.is_empty() {
            eprintln!("[{}/{}] {name}: ok", index + 1, self.total);
        } else {
            eprintln!("[{}/{}] {name}: missing {}", index + 1, self.total, missing.join(", "));
        }
    }
    fn item_failed(&mut self, index: usize, name: &str, reason: &str) {
        eprintln!("[{}/{}] {name}: {reason}", index + 1, self.total);
    }
}

fn run_batch(extractor: &ScoreExtractor, roster_path: &Path, opts: &AppOptions) -> color_eyre::Result<()> {
    let students = roster::load(roster_path)?;
    let mut progress = CliProgress { total: 0 };
    let summary = batch::run(&students, extractor, &opts.batch, Some(&mut progress))?;

    if summary.rows.is_empty() {
        bail!("no student could be processed ({} failures)", summary.failures.len());
    }

    let headers = results::headers(extractor.settings());
    let rows: Vec<Vec<String>> = summary.rows.iter().map(|r| r.to_cells()).collect();
    let path = write_export(&opts.export, &headers, &rows)?;

    let set = ResultSet::from_rows(extractor.settings(), &summary.rows);
    progress.log(&format!(
        "Wrote {} rows to {} ({} complete, {} partial, {} failures)",
        summary.processed(), path.display(), summary.complete, summary.partial, summary.failures.len()
    ));
    for f in &summary.failures {
        progress.log(&format!("  {}: {}", f.student.listing_name(), f.kind));
    }
    for field in set.fields() {
        if let Some(st) = FieldStats::from_values(&set.values(field)) {
            progress.log(&format!(
                "  {:<24} mean {:.1}  min {:.0}  max {:.0}",
                set.field_name(field), st.mean, st.min, st.max
            ));
        }
    }
    Ok(())
}

/* ---------------- verify ---------------- */

fn verify(roster_path: &Path, docs: &Path, kind: DocKind) -> color_eyre::Result<()> {
    let students = roster::load(roster_path)?;
    let index = DocIndex::scan(docs, kind.ext())?;
    let report = index.verify(&students);

    let mut out = std::io::stdout().lock();
    writeln!(out, "Roster: {} students, {} .{} files", students.len(), index.len(), kind.ext())?;
    writeln!(out, "Found: {}", report.found.len())?;
    writeln!(out, "Missing: {}", report.missing.len())?;
    for st in &report.missing {
        writeln!(out, "  {} ({})", crate::locate::expected_file_name(st, kind.ext()), st.listing_name())?;
    }
    if !report.extra.is_empty() {
        writeln!(out, "Not in roster: {}", report.extra.len())?;
        for name in &report.extra {
            writeln!(out, "  {name}")?;
        }
    }
    Ok(())
}

/* ---------------- report / compare ---------------- */

fn report(settings: &ExtractorSettings, path: &Path, top: usize, bins: usize) -> color_eyre::Result<()> {
    let set = results::load(path, settings)?;
    let mut out = std::io::stdout().lock();

    writeln!(out, "Students: {}", set.len())?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<24}{:>6}{:>8}{:>8}{:>8}{:>8}{:>6}{:>6}{:>8}{:>8}{:>8}",
        "Field", "n", "mean", "median", "mode", "std", "min", "max", "p25", "p75", "cv%"
    )?;
    for field in set.fields() {
        let name = set.field_name(field);
        match FieldStats::from_values(&set.values(field)) {
            Some(st) => writeln!(
                out,
                "{:<24}{:>6}{:>8.1}{:>8.1}{:>8.0}{:>8.1}{:>6.0}{:>6.0}{:>8.1}{:>8.1}{:>8.1}",
                name, st.count, st.mean, st.median, st.mode, st.std_dev, st.min, st.max, st.p25, st.p75, st.cv
            )?,
            None => writeln!(out, "{name:<24}{:>6}", 0)?,
        }
    }

    writeln!(out)?;
    writeln!(out, "Bands ({GLOBAL_COLUMN})")?;
    for b in stats::band_distribution(&set) {
        writeln!(out, "  {:<20}{:>5}{:>8.1}%", b.band.label(), b.count, b.percent)?;
    }

    writeln!(out)?;
    writeln!(out, "Ranking (top {top})")?;
    for e in stats::ranking(&set, Field::Global).iter().take(top) {
        writeln!(out, "  {:>3}. {:<40}{:>6.0}{:>8.1}", e.rank, e.student.name, e.score, e.percentile)?;
    }

    let (cut, best) = stats::top_segment(&set, TOP_QUANTILE);
    writeln!(out)?;
    writeln!(out, "Top segment (global >= {cut:.0}): {}", best.len())?;
    for s in &best {
        writeln!(out, "  {:<40}{:>6.0}", s.name, s.global.unwrap_or(0.0))?;
    }

    let (cut, low) = stats::bottom_segment(&set, BOTTOM_QUANTILE);
    writeln!(out)?;
    writeln!(out, "Support segment (global <= {cut:.0}): {}", low.len())?;
    for s in &low {
        writeln!(out, "  {:<40}{:>6.0}", s.name, s.global.unwrap_or(0.0))?;
    }

    if let Some(h) = Histogram::new(&set.values(Field::Global), bins) {
        writeln!(out)?;
        writeln!(out, "Histogram ({GLOBAL_COLUMN})")?;
        for (i, count) in h.counts.iter().enumerate() {
            writeln!(out, "  {:>6.1} - {:>6.1} {:>4} {}", h.edges[i], h.edges[i + 1], count, "#".repeat(*count))?;
        }
    }
    Ok(())
}

fn compare(settings: &ExtractorSettings, previous: &Path, current: &Path) -> color_eyre::Result<()> {
    let prev = results::load(previous, settings)?;
    let cur = results::load(current, settings)?;
    let cmp = stats::compare(&prev, &cur);

    let mut out = std::io::stdout().lock();
    writeln!(out, "{:<24}{:>10}{:>10}{:>10}{:>10}", "Field", "previous", "current", "change", "change%")?;
    for f in &cmp.fields {
        writeln!(
            out,
            "{:<24}{:>10.1}{:>10.1}{:>+10.1}{:>+10.1}",
            f.field, f.previous, f.current, f.change, f.change_percent
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Mean change: {:+.1} ({})", cmp.mean_change, cmp.trend)?;
    Ok(())
}
