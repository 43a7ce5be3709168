//! Trainer error types.
//!
//! Startup configuration problems, malformed input rows, and actions issued
//! against a session that has nothing left to ask.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Mode;

/// Errors that can occur while starting or driving a training session.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// "Upload" was selected as the source but no data was supplied.
    #[error("no CSV data supplied: choose a file to upload first")]
    MissingUpload,

    /// A built-in data set was selected but its file does not exist.
    #[error("built-in CSV not found: {}", .0.display())]
    MissingBuiltin(PathBuf),

    /// A row has fewer columns than the selected mode needs.
    #[error("row {row}: {mode} data needs at least {expected} columns, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
        mode: Mode,
    },

    /// The CSV reader or writer failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Reading input or appending to the mistake log failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// `start` was called on a trainer that already has a session.
    #[error("a training session is already running")]
    AlreadyStarted,

    /// An answer action was issued with no question on screen.
    #[error("no question is being presented")]
    NoActiveQuestion,
}

impl TrainerError {
    /// Returns `true` for the startup errors that leave the trainer unstarted
    /// and need corrected input before retrying.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TrainerError::MissingUpload | TrainerError::MissingBuiltin(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_classified() {
        assert!(TrainerError::MissingUpload.is_config_error());
        assert!(TrainerError::MissingBuiltin(PathBuf::from("data/x.csv")).is_config_error());
        assert!(!TrainerError::NoActiveQuestion.is_config_error());
        assert!(!TrainerError::MalformedRow {
            row: 3,
            expected: 7,
            found: 2,
            mode: Mode::Verb,
        }
        .is_config_error());
    }

    #[test]
    fn io_cause_is_printed_once() {
        let err = TrainerError::from(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(format!("{:#}", anyhow::Error::new(err)), "disk full");
    }

    #[test]
    fn malformed_row_names_the_row() {
        let err = TrainerError::MalformedRow {
            row: 4,
            expected: 3,
            found: 1,
            mode: Mode::Vocabulary,
        };
        let msg = err.to_string();
        assert!(msg.contains("row 4"));
        assert!(msg.contains("vocabulary"));
        assert!(msg.contains("found 1"));
    }
}
