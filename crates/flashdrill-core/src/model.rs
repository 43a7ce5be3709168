//! Core data model types for flashdrill.
//!
//! Typed rows for the two CSV layouts, the questions built from them, and the
//! options a session is started with.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Marks a verb form that does not exist and must never be asked.
pub const PLACEHOLDER: &str = "—";

/// Number of conjugated forms in a verb row (columns 1..=6).
pub const VERB_FORMS: usize = 6;

/// What kind of drill a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Vocabulary,
    Verb,
}

impl Mode {
    /// Minimum number of CSV columns a row needs in this mode.
    pub fn min_columns(self) -> usize {
        match self {
            Mode::Vocabulary => 3,
            Mode::Verb => 1 + VERB_FORMS,
        }
    }

    /// Folder the mistake log for this mode is written to.
    pub fn results_folder(self) -> &'static str {
        match self {
            Mode::Vocabulary => "training_results",
            Mode::Verb => "training_results_verb",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Vocabulary => write!(f, "vocabulary"),
            Mode::Verb => write!(f, "verb"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vocabulary" | "vocab" => Ok(Mode::Vocabulary),
            "verb" | "verbs" | "conjugation" => Ok(Mode::Verb),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// One vocabulary row: `prompt, note, answer, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    /// Column 0. May hold comma-separated variants; extreme mode shows only the first.
    pub prompt: String,
    /// Column 1. Loaded but never displayed.
    pub note: String,
    /// Column 2.
    pub answer: String,
    /// Any columns past the answer, kept so the row can be logged verbatim.
    pub extra: Vec<String>,
    /// 1-based line the row starts on in its CSV file, 0 when built in memory.
    pub line: usize,
}

impl VocabEntry {
    /// Text shown as the question. With `extreme` set, only the part before
    /// the first comma.
    pub fn question_text(&self, extreme: bool) -> &str {
        if extreme {
            self.prompt.split(',').next().unwrap_or_default()
        } else {
            &self.prompt
        }
    }

    /// The raw row, in column order.
    pub fn fields(&self) -> Vec<String> {
        let mut row = vec![self.prompt.clone(), self.note.clone(), self.answer.clone()];
        row.extend(self.extra.iter().cloned());
        row
    }
}

/// One verb row: `lemma, form1 .. form6, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbEntry {
    /// Column 0.
    pub lemma: String,
    /// Columns 1..=6; `None` where the cell held the placeholder.
    pub forms: [Option<String>; VERB_FORMS],
    /// Any columns past the sixth form.
    pub extra: Vec<String>,
    /// 1-based line the row starts on in its CSV file, 0 when built in memory.
    pub line: usize,
}

impl VerbEntry {
    /// The form in CSV column `column` (1..=6), if it exists.
    pub fn form(&self, column: usize) -> Option<&str> {
        column
            .checked_sub(1)
            .and_then(|i| self.forms.get(i))
            .and_then(|f| f.as_deref())
    }

    /// Column indices (1..=6) of the forms that can be asked.
    pub fn askable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.forms
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_some())
            .map(|(i, _)| i + 1)
    }

    /// The raw row, in column order, with placeholders restored.
    pub fn fields(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(1 + VERB_FORMS + self.extra.len());
        row.push(self.lemma.clone());
        row.extend(
            self.forms
                .iter()
                .map(|f| f.clone().unwrap_or_else(|| PLACEHOLDER.to_string())),
        );
        row.extend(self.extra.iter().cloned());
        row
    }
}

/// A single unit of display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    Vocabulary(VocabEntry),
    /// `form` is the CSV column (1..=6) holding the asked form.
    Verb { form: usize, entry: VerbEntry },
}

impl Question {
    /// The row written to the mistake log for this question.
    ///
    /// Vocabulary questions log the entry verbatim. Verb questions log the
    /// form column first, then the entry verbatim, so a reader can tell which
    /// form was missed.
    pub fn log_row(&self) -> Vec<String> {
        match self {
            Question::Vocabulary(entry) => entry.fields(),
            Question::Verb { form, entry } => {
                let mut row = vec![form.to_string()];
                row.extend(entry.fields());
                row
            }
        }
    }
}

/// Rows loaded from one CSV file, typed for the selected mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dataset {
    Vocabulary(Vec<VocabEntry>),
    Verb(Vec<VerbEntry>),
}

impl Dataset {
    pub fn mode(&self) -> Mode {
        match self {
            Dataset::Vocabulary(_) => Mode::Vocabulary,
            Dataset::Verb(_) => Mode::Verb,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Dataset::Vocabulary(rows) => rows.len(),
            Dataset::Verb(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the rows into questions, in file order.
    ///
    /// Verb rows yield one question per askable form.
    pub fn questions(&self) -> Vec<Question> {
        match self {
            Dataset::Vocabulary(rows) => rows.iter().cloned().map(Question::Vocabulary).collect(),
            Dataset::Verb(rows) => rows
                .iter()
                .flat_map(|entry| {
                    entry.askable_columns().map(move |form| Question::Verb {
                        form,
                        entry: entry.clone(),
                    })
                })
                .collect(),
        }
    }
}

/// CSV contents supplied by the user rather than read from the data dir.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Display name, usually the original file name.
    pub name: String,
    pub content: Vec<u8>,
}

impl Upload {
    /// Read an upload from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read CSV file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, content })
    }
}

/// Where a session's rows come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    BuiltinVocabulary,
    BuiltinVerb,
    /// `None` when the user picked upload but supplied nothing.
    Upload(Option<Upload>),
}

impl DataSource {
    /// Mode that matches the source when the user does not pick one.
    pub fn default_mode(&self) -> Mode {
        match self {
            DataSource::BuiltinVerb => Mode::Verb,
            _ => Mode::Vocabulary,
        }
    }

    /// Short human-readable label for reports.
    pub fn label(&self) -> String {
        match self {
            DataSource::BuiltinVocabulary => "built-in vocabulary".to_string(),
            DataSource::BuiltinVerb => "built-in verbs".to_string(),
            DataSource::Upload(Some(upload)) => upload.name.clone(),
            DataSource::Upload(None) => "upload".to_string(),
        }
    }
}

/// Paths of the two built-in data sets.
#[derive(Debug, Clone)]
pub struct BuiltinSets {
    pub vocabulary: PathBuf,
    pub verb: PathBuf,
}

/// Options chosen when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingOptions {
    /// Vocabulary only: show the prompt up to its first comma.
    #[serde(default = "default_true")]
    pub extreme: bool,
    /// Randomize question order before truncating.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Keep only the first `limit` questions (0 = all).
    #[serde(default)]
    pub limit: usize,
    /// Append every wrong answer to the mistake log.
    #[serde(default)]
    pub record_mistakes: bool,
    /// Re-ask wrong answers once a pass ends.
    #[serde(default = "default_true")]
    pub auto_review: bool,
    /// Display size in pixels. No effect on the session itself.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            extreme: true,
            shuffle: true,
            limit: 0,
            record_mistakes: false,
            auto_review: true,
            font_size: default_font_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> u32 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb(lemma: &str, forms: [&str; VERB_FORMS]) -> VerbEntry {
        VerbEntry {
            lemma: lemma.into(),
            forms: forms.map(|f| (f != PLACEHOLDER).then(|| f.to_string())),
            extra: vec![],
            line: 0,
        }
    }

    #[test]
    fn mode_display_and_parse() {
        assert_eq!(Mode::Vocabulary.to_string(), "vocabulary");
        assert_eq!(Mode::Verb.to_string(), "verb");
        assert_eq!("vocab".parse::<Mode>().unwrap(), Mode::Vocabulary);
        assert_eq!("Conjugation".parse::<Mode>().unwrap(), Mode::Verb);
        assert!("grammar".parse::<Mode>().is_err());
    }

    #[test]
    fn extreme_truncates_at_first_comma() {
        let entry = VocabEntry {
            prompt: "cat,N,animal".into(),
            note: String::new(),
            answer: "gato".into(),
            extra: vec![],
            line: 0,
        };
        assert_eq!(entry.question_text(true), "cat");
        assert_eq!(entry.question_text(false), "cat,N,animal");

        let plain = VocabEntry {
            prompt: "dog".into(),
            ..entry
        };
        assert_eq!(plain.question_text(true), "dog");
    }

    #[test]
    fn verb_fields_restore_placeholders() {
        let entry = verb("be", ["am", "—", "is", "are", "—", "are"]);
        assert_eq!(entry.form(1), Some("am"));
        assert_eq!(entry.form(2), None);
        assert_eq!(entry.form(0), None);
        assert_eq!(entry.form(7), None);
        assert_eq!(
            entry.fields(),
            vec!["be", "am", "—", "is", "are", "—", "are"]
        );
        assert_eq!(entry.askable_columns().collect::<Vec<_>>(), vec![1, 3, 4, 6]);
    }

    #[test]
    fn verb_expansion_skips_placeholders() {
        let data = Dataset::Verb(vec![
            verb("run", ["trecho", "treis", "trei", "trecem", "treați", "treau"]),
            verb("rain", ["—", "—", "plouă", "—", "—", "—"]),
        ]);
        let questions = data.questions();
        assert_eq!(questions.len(), 7);
        assert!(matches!(&questions[6], Question::Verb { form: 3, entry } if entry.lemma == "rain"));
    }

    #[test]
    fn verb_log_row_prefixes_form_column() {
        let q = Question::Verb {
            form: 3,
            entry: verb("run", ["trecho", "treis", "trei", "trecem", "treați", "treau"]),
        };
        assert_eq!(
            q.log_row(),
            vec!["3", "run", "trecho", "treis", "trei", "trecem", "treați", "treau"]
        );
    }

    #[test]
    fn vocab_log_row_is_verbatim() {
        let q = Question::Vocabulary(VocabEntry {
            prompt: "cat,N".into(),
            note: "noun".into(),
            answer: "gato".into(),
            extra: vec!["A1".into()],
            line: 0,
        });
        assert_eq!(q.log_row(), vec!["cat,N", "noun", "gato", "A1"]);
    }

    #[test]
    fn training_options_default() {
        let opts = TrainingOptions::default();
        assert!(opts.extreme);
        assert!(opts.shuffle);
        assert!(opts.auto_review);
        assert!(!opts.record_mistakes);
        assert_eq!(opts.limit, 0);
        assert_eq!(opts.font_size, 60);
    }

    #[test]
    fn source_default_mode() {
        assert_eq!(DataSource::BuiltinVerb.default_mode(), Mode::Verb);
        assert_eq!(DataSource::BuiltinVocabulary.default_mode(), Mode::Vocabulary);
        assert_eq!(DataSource::Upload(None).default_mode(), Mode::Vocabulary);
    }
}
