//! Trainer configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{BuiltinSets, TrainingOptions};

/// Top-level flashdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Directory holding the built-in data sets.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Built-in vocabulary file, relative to `data_dir`.
    #[serde(default = "default_vocabulary_file")]
    pub vocabulary_file: PathBuf,
    /// Built-in verb file, relative to `data_dir`.
    #[serde(default = "default_verb_file")]
    pub verb_file: PathBuf,
    /// Root under which the mistake log folders are created.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Option values used when the command line does not set them.
    #[serde(default)]
    pub defaults: TrainingOptions,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_vocabulary_file() -> PathBuf {
    PathBuf::from("greek_vocabulary_edited.csv")
}
fn default_verb_file() -> PathBuf {
    PathBuf::from("greek_verb_form_edited.csv")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vocabulary_file: default_vocabulary_file(),
            verb_file: default_verb_file(),
            results_dir: default_results_dir(),
            defaults: TrainingOptions::default(),
        }
    }
}

impl TrainerConfig {
    /// Resolved paths of the built-in data sets.
    pub fn builtin_sets(&self) -> BuiltinSets {
        BuiltinSets {
            vocabulary: self.data_dir.join(&self.vocabulary_file),
            verb: self.data_dir.join(&self.verb_file),
        }
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order when no path is given:
/// 1. `flashdrill.toml` in the current directory
/// 2. `~/.config/flashdrill/config.toml`
///
/// Environment variable overrides: `FLASHDRILL_DATA_DIR`, `FLASHDRILL_RESULTS_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<TrainerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => TrainerConfig::default(),
    };

    if let Ok(dir) = std::env::var("FLASHDRILL_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("FLASHDRILL_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn parse_config(path: &Path) -> Result<TrainerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<TrainerConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashdrill"))
}
