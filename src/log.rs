// src/log.rs
//
// Debug log at .store/debug.log, one line per event:
//   [hh:mm:ss.mmm] LEVEL message
// Stamps are time since start, not wall clock. RUST_LOG overrides the
// default `info` filter.

use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::error::{Error, Result};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

pub fn default_log_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_FILE)
}

/// Install the file logger. Safe to call twice; the second call is a no-op.
pub fn init() -> Result<PathBuf> {
    init_at(&default_log_path())
}

pub fn init_at(path: &Path) -> Result<PathBuf> {
    start();
    crate::file::ensure_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_timer(Uptime)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    if installed.is_ok() {
        tracing::info!("log started ({})", env!("CARGO_PKG_VERSION"));
    }
    Ok(path.to_path_buf())
}
