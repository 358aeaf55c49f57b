// src/progress.rs
/// Lightweight progress reporting for the batch run.
/// The CLI implements this to print one line per student.
pub trait Progress {
    /// Called at the start with the number of students to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One student processed; `missing` lists the fields that could not be read.
    fn item_done(&mut self, _index: usize, _name: &str, _missing: &[String]) {}

    /// One student skipped entirely (no document, unreadable file).
    fn item_failed(&mut self, _index: usize, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
