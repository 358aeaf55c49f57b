// src/extract/mod.rs
//! # Score extraction
//!
//! Turns the OCR text of one Saber 11 result page into a [`ScoreRecord`]:
//! five subject scores (0–100) and the global score (0–500).
//!
//! ## What lives here
//! - **Pure text parsing.** No file access, no logging side channels; the
//!   same input always yields the same record.
//! - **Positional recovery** of the subject scores: the line holding the
//!   subject names anchors the search, and the score line(s) right below it
//!   are read in canonical subject order.
//! - **Digit-merge decoding** ([`DecodeRules`]): OCR tends to read
//!   `57/100` as `57100`, `5700` or `157`. Each digit run is mapped back to
//!   the one score it most likely came from.
//!
//! ## What does **not** live here
//! - Reading PDFs or text dumps (`source`), locating documents (`locate`),
//!   joining records with students (`batch`). The extractor has no idea who
//!   the text belongs to.
//!
//! ## Conventions & invariants
//! - Failure is never an error: a field that cannot be recovered is `None`.
//! - Out-of-range candidates are **dropped**, never clamped.
//! - Subject order and names come from [`ExtractorSettings`], fixed when the
//!   extractor is built.
//!
//! ## Typical call chain
//! ```text
//! batch::run → source::read_text → ScoreExtractor::extract → ScoreRecord
//!                                                          ↘ ResultRow (with Student)
//! ```
pub mod decode;
pub mod extractor;
pub mod record;
pub mod settings;

pub use decode::DecodeRules;
pub use extractor::ScoreExtractor;
pub use record::{ScoreRecord, SubjectScore};
pub use settings::{ExtractorSettings, Subject};
