// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod extract;

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod csv;
pub mod file;
pub mod locate;
pub mod log;
pub mod progress;
pub mod results;
pub mod roster;
pub mod source;
pub mod stats;
pub mod table;

pub use error::{Error, Result};
pub use extract::{DecodeRules, ExtractorSettings, ScoreExtractor, ScoreRecord, Subject, SubjectScore};
pub use results::ResultRow;
pub use roster::Student;
