//! Session report types with JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Mode, TrainingOptions};
use crate::session::Session;

/// Tally for one pass over the question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// 1 for the first pass, 2+ for review passes.
    pub pass: u32,
    /// Questions in this pass.
    pub questions: usize,
    pub correct: usize,
    pub wrong: usize,
}

impl PassStats {
    pub fn new(pass: u32, questions: usize) -> Self {
        Self {
            pass,
            questions,
            correct: 0,
            wrong: 0,
        }
    }

    /// Questions answered so far in this pass.
    pub fn answered(&self) -> usize {
        self.correct + self.wrong
    }

    /// Share of answered questions marked correct, 0.0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        match self.answered() {
            0 => 0.0,
            n => self.correct as f64 / n as f64,
        }
    }
}

/// A complete session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session identifier.
    pub id: Uuid,
    pub started_at: DateTime<Local>,
    /// `None` if the session was abandoned before completing.
    pub finished_at: Option<DateTime<Local>>,
    pub mode: Mode,
    /// Where the rows came from.
    pub source: String,
    pub options: TrainingOptions,
    /// Per-pass tallies, first pass first.
    pub passes: Vec<PassStats>,
    pub total_correct: usize,
    pub total_wrong: usize,
    /// Mistake log path, when mistakes were recorded.
    pub mistake_log: Option<PathBuf>,
    /// Rows appended to the mistake log.
    pub mistakes_recorded: usize,
}

impl SessionReport {
    /// Snapshot a session.
    pub fn from_session(session: &Session) -> Self {
        let passes = session.passes().to_vec();
        let mistake_log = if session.options().record_mistakes && session.mistakes_recorded() > 0 {
            session.mistake_log().map(Path::to_path_buf)
        } else {
            None
        };

        Self {
            id: session.id(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
            mode: session.mode(),
            source: session.source().to_string(),
            options: *session.options(),
            total_correct: passes.iter().map(|p| p.correct).sum(),
            total_wrong: passes.iter().map(|p| p.wrong).sum(),
            passes,
            mistake_log,
            mistakes_recorded: session.mistakes_recorded(),
        }
    }

    /// Whether the session ran to completion.
    pub fn completed(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Accuracy of the first pass, the only one that covers every question.
    pub fn first_pass_accuracy(&self) -> f64 {
        self.passes.first().map_or(0.0, PassStats::accuracy)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
