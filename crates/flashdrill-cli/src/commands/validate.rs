//! The `flashdrill validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use flashdrill_core::model::Mode;
use flashdrill_core::parser;

pub fn execute(file: PathBuf, mode: String) -> Result<()> {
    let mode: Mode = mode.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?;

    let dataset = parser::parse_dataset(&file, mode)
        .with_context(|| format!("failed to load {}", file.display()))?;

    println!(
        "{}: {} rows, {} questions ({mode} mode)",
        file.display(),
        dataset.len(),
        dataset.questions().len()
    );

    let warnings = parser::validate_dataset(&dataset);
    for w in &warnings {
        let prefix = w
            .row
            .map(|row| format!("  [row {row}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Data set valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
