//! Mistake log.
//!
//! Every wrong answer can be appended to a per-session CSV file under
//! `<results>/training_results/` (vocabulary) or
//! `<results>/training_results_verb/` (verbs), named
//! `<YYYY-MM-DD HH-MM-SS>_mistakes.csv`.
//!
//! Row layout, one row per wrong answer and no header:
//! - vocabulary: the source row verbatim;
//! - verbs: the missed form's column (1..=6), then the source row verbatim.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::TrainerError;
use crate::model::Mode;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// Sink for wrong answers.
pub trait MistakeRecorder: std::fmt::Debug {
    /// Append one row.
    fn record(&mut self, row: &[String]) -> Result<(), TrainerError>;

    /// Where rows end up, if they are persisted.
    fn location(&self) -> Option<&Path>;

    /// Number of rows appended so far.
    fn recorded(&self) -> usize;
}

/// Append-only CSV mistake log owned by one session.
///
/// Nothing touches the disk until the first row is recorded.
#[derive(Debug, Clone)]
pub struct CsvMistakeLog {
    path: PathBuf,
    rows: usize,
}

impl CsvMistakeLog {
    /// Log at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: 0,
        }
    }

    /// Log for a session in `mode` started at `started`, under `results_dir`.
    ///
    /// If the timestamped name is already taken, a `_2`, `_3`, ... suffix is
    /// added so an earlier session's log is never appended to.
    pub fn for_session(results_dir: &Path, mode: Mode, started: DateTime<Local>) -> Self {
        let folder = results_dir.join(mode.results_folder());
        let stamp = started.format(TIMESTAMP_FORMAT).to_string();

        let mut path = folder.join(format!("{stamp}_mistakes.csv"));
        let mut n = 2;
        while path.exists() {
            path = folder.join(format!("{stamp}_{n}_mistakes.csv"));
            n += 1;
        }
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MistakeRecorder for CsvMistakeLog {
    fn record(&mut self, row: &[String]) -> Result<(), TrainerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if file.metadata()?.len() == 0 {
            file.write_all("\u{feff}".as_bytes())?;
        }

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;

        self.rows += 1;
        tracing::debug!(path = %self.path.display(), rows = self.rows, "recorded mistake");
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn recorded(&self) -> usize {
        self.rows
    }
}

/// Keeps recorded rows in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryMistakeLog {
    pub rows: Vec<Vec<String>>,
}

impl MistakeRecorder for MemoryMistakeLog {
    fn record(&mut self, row: &[String]) -> Result<(), TrainerError> {
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        None
    }

    fn recorded(&self) -> usize {
        self.rows.len()
    }
}
