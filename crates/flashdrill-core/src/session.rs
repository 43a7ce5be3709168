//! Trainer session state machine.
//!
//! A `Trainer` starts out unstarted. `start` loads a data set and builds the
//! question list; after that the three answer actions drive one `Session`
//! through its passes until nothing is left to ask.
//!
//! ```text
//! Unstarted --start--> Presenting(0) --reveal--> Revealed(i)
//!     Presenting(i) / Revealed(i) --correct|wrong--> Presenting(i+1)
//!     end of pass: mistakes && auto_review --> Presenting(0) of a review pass
//!                  otherwise                --> Completed
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::error::TrainerError;
use crate::mistakes::{CsvMistakeLog, MistakeRecorder};
use crate::model::{BuiltinSets, DataSource, Dataset, Mode, Question, TrainingOptions};
use crate::parser;
use crate::render::{Answer, Card, PromptKind};
use crate::report::{PassStats, SessionReport};

/// Observable state of a trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unstarted,
    /// Question at this position is shown without its answer.
    Presenting(usize),
    /// Question at this position is shown with its answer.
    Revealed(usize),
    Completed,
}

/// What an answer action led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved on to the next question in the same pass.
    Next,
    /// The pass ended and a review pass over its mistakes began.
    ReviewStarted { questions: usize },
    /// Nothing left to ask.
    Completed,
}

/// One running training session.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    mode: Mode,
    source: String,
    options: TrainingOptions,
    questions: Vec<Question>,
    position: usize,
    mistakes: Vec<Question>,
    revealed: Option<usize>,
    recorder: Box<dyn MistakeRecorder>,
    passes: Vec<PassStats>,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
}

impl Session {
    /// Build the question list from `dataset` and present the first question.
    ///
    /// Order of operations: expand (verb rows become one question per form),
    /// shuffle, then truncate to `options.limit`.
    pub fn new<R: Rng + ?Sized>(
        dataset: &Dataset,
        source: impl Into<String>,
        options: TrainingOptions,
        recorder: Box<dyn MistakeRecorder>,
        rng: &mut R,
    ) -> Self {
        let mut questions = dataset.questions();
        if options.shuffle {
            questions.shuffle(rng);
        }
        if options.limit > 0 {
            questions.truncate(options.limit);
        }

        let mut session = Self {
            id: Uuid::new_v4(),
            mode: dataset.mode(),
            source: source.into(),
            options,
            passes: vec![PassStats::new(1, questions.len())],
            questions,
            position: 0,
            mistakes: Vec::new(),
            revealed: None,
            recorder,
            started_at: Local::now(),
            finished_at: None,
        };
        tracing::info!(
            session = %session.id,
            mode = %session.mode,
            questions = session.questions.len(),
            "training session started"
        );
        session.settle();
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &TrainingOptions {
        &self.options
    }

    /// Questions of the current pass.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Wrong answers collected so far in the current pass.
    pub fn mistakes(&self) -> &[Question] {
        &self.mistakes
    }

    /// 1-based number of the current pass.
    pub fn pass(&self) -> u32 {
        self.passes.len() as u32
    }

    pub fn passes(&self) -> &[PassStats] {
        &self.passes
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Local>> {
        self.finished_at
    }

    pub fn is_completed(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Mistake log path, when the recorder persists to disk.
    pub fn mistake_log(&self) -> Option<&Path> {
        self.recorder.location()
    }

    /// Rows written to the mistake log so far.
    pub fn mistakes_recorded(&self) -> usize {
        self.recorder.recorded()
    }

    pub fn phase(&self) -> Phase {
        if self.is_completed() {
            Phase::Completed
        } else if self.revealed == Some(self.position) {
            Phase::Revealed(self.position)
        } else {
            Phase::Presenting(self.position)
        }
    }

    pub fn current(&self) -> Option<&Question> {
        if self.is_completed() {
            return None;
        }
        self.questions.get(self.position)
    }

    /// Display payload for the current question, `None` once completed.
    pub fn card(&self) -> Option<Card> {
        let question = self.current()?;
        let revealed = self.revealed == Some(self.position);

        let (kind, prompt, answer) = match question {
            Question::Vocabulary(entry) => (
                PromptKind::Question,
                entry.question_text(self.options.extreme).to_string(),
                revealed.then(|| Answer::Text(entry.answer.clone())),
            ),
            Question::Verb { form, entry } => (
                PromptKind::Form,
                entry.form(*form).unwrap_or_default().to_string(),
                revealed.then(|| Answer::highlighted(&entry.fields(), *form)),
            ),
        };

        Some(Card {
            position: self.position,
            total: self.questions.len(),
            pass: self.pass(),
            font_size: self.options.font_size,
            kind,
            prompt,
            answer,
        })
    }

    /// Show the answer for the current question. Never moves the position.
    pub fn reveal(&mut self) -> Result<(), TrainerError> {
        self.current().ok_or(TrainerError::NoActiveQuestion)?;
        self.revealed = Some(self.position);
        tracing::debug!(position = self.position, "answer revealed");
        Ok(())
    }

    /// Mark the current question as answered correctly.
    pub fn correct(&mut self) -> Result<Transition, TrainerError> {
        self.current().ok_or(TrainerError::NoActiveQuestion)?;
        tracing::debug!(position = self.position, "correct");
        if let Some(stats) = self.passes.last_mut() {
            stats.correct += 1;
        }
        Ok(self.advance())
    }

    /// Mark the current question as answered wrongly.
    ///
    /// With `record_mistakes` set, the row is appended to the log first; if
    /// that fails the error is returned and the session is left untouched.
    pub fn wrong(&mut self) -> Result<Transition, TrainerError> {
        let question = self
            .current()
            .cloned()
            .ok_or(TrainerError::NoActiveQuestion)?;

        if self.options.record_mistakes {
            self.recorder.record(&question.log_row())?;
        }
        tracing::debug!(position = self.position, "wrong");

        self.mistakes.push(question);
        if let Some(stats) = self.passes.last_mut() {
            stats.wrong += 1;
        }
        Ok(self.advance())
    }

    /// Summary of the session so far.
    pub fn report(&self) -> SessionReport {
        SessionReport::from_session(self)
    }

    fn advance(&mut self) -> Transition {
        self.position += 1;
        self.revealed = None;
        self.settle()
    }

    /// Terminal check: at the end of a pass either start a review pass over
    /// its mistakes or complete the session.
    fn settle(&mut self) -> Transition {
        if self.position < self.questions.len() {
            return Transition::Next;
        }

        if self.options.auto_review && !self.mistakes.is_empty() {
            self.questions = std::mem::take(&mut self.mistakes);
            self.position = 0;
            self.revealed = None;
            self.passes
                .push(PassStats::new(self.passes.len() as u32 + 1, self.questions.len()));
            tracing::info!(
                pass = self.pass(),
                questions = self.questions.len(),
                "reviewing mistakes"
            );
            return Transition::ReviewStarted {
                questions: self.questions.len(),
            };
        }

        self.revealed = None;
        if self.finished_at.is_none() {
            self.finished_at = Some(Local::now());
            tracing::info!(
                session = %self.id,
                passes = self.passes.len(),
                "training session completed"
            );
        }
        Transition::Completed
    }
}

/// Owns at most one session and the settings needed to start it.
#[derive(Debug)]
pub struct Trainer {
    builtin: BuiltinSets,
    results_dir: PathBuf,
    session: Option<Session>,
}

impl Trainer {
    pub fn new(builtin: BuiltinSets, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            builtin,
            results_dir: results_dir.into(),
            session: None,
        }
    }

    /// Load `source` for `mode` and start a session.
    ///
    /// On any error the trainer stays unstarted.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        source: &DataSource,
        mode: Mode,
        options: TrainingOptions,
        rng: &mut R,
    ) -> Result<&Session, TrainerError> {
        if self.session.is_some() {
            return Err(TrainerError::AlreadyStarted);
        }

        let dataset = match source {
            DataSource::Upload(None) => return Err(TrainerError::MissingUpload),
            DataSource::Upload(Some(upload)) => {
                parser::parse_dataset_bytes(&upload.content, mode)?
            }
            DataSource::BuiltinVocabulary => load_builtin(&self.builtin.vocabulary, mode)?,
            DataSource::BuiltinVerb => load_builtin(&self.builtin.verb, mode)?,
        };

        let recorder = CsvMistakeLog::for_session(&self.results_dir, mode, Local::now());
        let session = Session::new(&dataset, source.label(), options, Box::new(recorder), rng);
        Ok(self.session.insert(session))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Unstarted, Session::phase)
    }

    pub fn card(&self) -> Option<Card> {
        self.session.as_ref().and_then(Session::card)
    }

    pub fn reveal(&mut self) -> Result<(), TrainerError> {
        self.active()?.reveal()
    }

    pub fn correct(&mut self) -> Result<Transition, TrainerError> {
        self.active()?.correct()
    }

    pub fn wrong(&mut self) -> Result<Transition, TrainerError> {
        self.active()?.wrong()
    }

    fn active(&mut self) -> Result<&mut Session, TrainerError> {
        self.session.as_mut().ok_or(TrainerError::NoActiveQuestion)
    }
}

fn load_builtin(path: &Path, mode: Mode) -> Result<Dataset, TrainerError> {
    if !path.exists() {
        return Err(TrainerError::MissingBuiltin(path.to_path_buf()));
    }
    parser::parse_dataset(path, mode)
}
