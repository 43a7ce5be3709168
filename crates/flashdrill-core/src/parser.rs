//! CSV data set parser.
//!
//! Loads vocabulary and verb tables from CSV files or uploaded bytes, and
//! validates them.

use std::collections::HashSet;
use std::path::Path;

use crate::error::TrainerError;
use crate::model::{Dataset, Mode, VerbEntry, VocabEntry, PLACEHOLDER, VERB_FORMS};

const BOM: &str = "\u{feff}";

/// Parse a CSV file from disk into a `Dataset` for `mode`.
pub fn parse_dataset(path: &Path, mode: Mode) -> Result<Dataset, TrainerError> {
    let content = std::fs::read(path)?;
    parse_dataset_bytes(&content, mode)
}

/// Parse raw CSV bytes into a `Dataset` for `mode`.
///
/// A leading UTF-8 byte-order mark is ignored. Any row with too few columns
/// fails the whole load.
pub fn parse_dataset_bytes(content: &[u8], mode: Mode) -> Result<Dataset, TrainerError> {
    let rows = read_rows(content)?;
    let expected = mode.min_columns();

    if let Some(short) = rows.iter().find(|r| r.cells.len() < expected) {
        return Err(TrainerError::MalformedRow {
            row: short.line,
            expected,
            found: short.cells.len(),
            mode,
        });
    }

    let dataset = match mode {
        Mode::Vocabulary => Dataset::Vocabulary(rows.into_iter().map(vocab_entry).collect()),
        Mode::Verb => Dataset::Verb(rows.into_iter().map(verb_entry).collect()),
    };
    tracing::debug!(mode = %mode, rows = dataset.len(), "parsed CSV data set");
    Ok(dataset)
}

/// Cells of one CSV record and the file line it starts on.
struct Row {
    line: usize,
    cells: Vec<String>,
}

fn read_rows(content: &[u8]) -> Result<Vec<Row>, TrainerError> {
    let content = content.strip_prefix(BOM.as_bytes()).unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(i + 1, |pos| pos.line() as usize);
        rows.push(Row {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(rows)
}

fn vocab_entry(row: Row) -> VocabEntry {
    let mut cols = row.cells.into_iter();
    VocabEntry {
        prompt: cols.next().unwrap_or_default(),
        note: cols.next().unwrap_or_default(),
        answer: cols.next().unwrap_or_default(),
        extra: cols.collect(),
        line: row.line,
    }
}

fn verb_entry(row: Row) -> VerbEntry {
    let mut cols = row.cells.into_iter();
    let lemma = cols.next().unwrap_or_default();
    let forms: [Option<String>; VERB_FORMS] =
        std::array::from_fn(|_| cols.next().filter(|cell| cell != PLACEHOLDER));
    VerbEntry {
        lemma,
        forms,
        extra: cols.collect(),
        line: row.line,
    }
}

/// A warning from data set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based line in the CSV file (if applicable).
    pub row: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a data set for rows that load but will train poorly.
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    match dataset {
        Dataset::Vocabulary(rows) => {
            let mut seen = HashSet::new();
            for entry in rows {
                let row = Some(entry.line);
                if entry.prompt.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        row,
                        message: "question is empty".into(),
                    });
                }
                if entry.answer.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        row,
                        message: "answer is empty".into(),
                    });
                }
                if !entry.prompt.is_empty() && !seen.insert(entry.prompt.as_str()) {
                    warnings.push(ValidationWarning {
                        row,
                        message: format!("duplicate question: {}", entry.prompt),
                    });
                }
            }
        }
        Dataset::Verb(rows) => {
            let mut seen = HashSet::new();
            for entry in rows {
                let row = Some(entry.line);
                if entry.askable_columns().next().is_none() {
                    warnings.push(ValidationWarning {
                        row,
                        message: format!(
                            "{}: every form is {PLACEHOLDER}, nothing to ask",
                            entry.lemma
                        ),
                    });
                }
                if !entry.lemma.is_empty() && !seen.insert(entry.lemma.as_str()) {
                    warnings.push(ValidationWarning {
                        row,
                        message: format!("duplicate verb: {}", entry.lemma),
                    });
                }
            }
        }
    }

    if dataset.is_empty() {
        warnings.push(ValidationWarning {
            row: None,
            message: "file has no rows".into(),
        });
    }

    warnings
}
