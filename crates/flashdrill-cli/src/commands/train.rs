//! The `flashdrill train` command.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flashdrill_core::config::load_config_from;
use flashdrill_core::model::{DataSource, Mode, TrainingOptions, Upload};
use flashdrill_core::{Trainer, TrainerError, Transition};

use crate::display::{Display, Style};
use crate::input::Action;

const FONT_SIZES: std::ops::RangeInclusive<u32> = 30..=100;

/// Which rows to train on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// The built-in vocabulary CSV
    Vocabulary,
    /// The built-in verb CSV
    Verb,
    /// A CSV given with --file
    File,
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Data source (default: file if --file is given, else vocabulary)
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Your own CSV file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Training mode: vocabulary or verb (default: matches the source)
    #[arg(long)]
    pub mode: Option<String>,

    /// Show vocabulary prompts only up to the first comma
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub extreme: Option<bool>,

    /// Shuffle questions before applying --limit
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub shuffle: Option<bool>,

    /// Append wrong answers to a mistake log CSV
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub record_mistakes: Option<bool>,

    /// Re-ask wrong answers at the end of each pass
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub auto_review: Option<bool>,

    /// Number of questions to use (0 = all)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Font size in pixels for HTML output (30-100)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output style
    #[arg(long, value_enum, default_value = "ansi")]
    pub style: Style,

    /// Write a JSON session report here when the session ends
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TrainArgs {
    /// Config defaults with command-line overrides applied.
    fn options(&self, defaults: &TrainingOptions) -> Result<TrainingOptions> {
        let options = TrainingOptions {
            extreme: self.extreme.unwrap_or(defaults.extreme),
            shuffle: self.shuffle.unwrap_or(defaults.shuffle),
            limit: self.limit.unwrap_or(defaults.limit),
            record_mistakes: self.record_mistakes.unwrap_or(defaults.record_mistakes),
            auto_review: self.auto_review.unwrap_or(defaults.auto_review),
            font_size: self.font_size.unwrap_or(defaults.font_size),
        };
        anyhow::ensure!(
            FONT_SIZES.contains(&options.font_size),
            "font size must be between {} and {}",
            FONT_SIZES.start(),
            FONT_SIZES.end()
        );
        Ok(options)
    }

    fn data_source(&self) -> Result<DataSource> {
        let kind = self.source.unwrap_or(if self.file.is_some() {
            SourceArg::File
        } else {
            SourceArg::Vocabulary
        });

        Ok(match kind {
            SourceArg::Vocabulary => DataSource::BuiltinVocabulary,
            SourceArg::Verb => DataSource::BuiltinVerb,
            SourceArg::File => match &self.file {
                Some(path) => DataSource::Upload(Some(Upload::from_path(path)?)),
                None => DataSource::Upload(None),
            },
        })
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let style = args.style;
    let clear = style == Style::Ansi && io::stdout().is_terminal();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(args, stdin.lock(), Display::new(stdout.lock(), style, clear))
}

fn run<R: BufRead, W: Write>(
    args: TrainArgs,
    mut input: R,
    mut display: Display<W>,
) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let options = args.options(&config.defaults)?;
    let source = args.data_source()?;
    let mode = match &args.mode {
        Some(m) => m.parse::<Mode>().map_err(|e| anyhow::anyhow!("{e}"))?,
        None => source.default_mode(),
    };
    tracing::debug!(?options, %mode, source = %source.label(), "resolved training options");
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut trainer = Trainer::new(config.builtin_sets(), config.results_dir.clone());
    let session = trainer
        .start(&source, mode, options, &mut rng)
        .map_err(|e| {
            if e.is_config_error() {
                anyhow::Error::new(e)
                    .context("cannot start training (check --source/--file or data_dir)")
            } else {
                e.into()
            }
        })?;
    display.show_notice(&format!(
        "{} {mode} questions from {}",
        session.questions().len(),
        session.source()
    ))?;

    let mut line = String::new();
    while let Some(card) = trainer.card() {
        display.show_card(&card)?;
        display.show_prompt()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let transition = match Action::parse(&line) {
            Some(Action::Reveal) => {
                trainer.reveal()?;
                None
            }
            Some(Action::Correct) => Some(trainer.correct()?),
            Some(Action::Wrong) => match trainer.wrong() {
                Ok(transition) => Some(transition),
                Err(e @ (TrainerError::Io(_) | TrainerError::Csv(_))) => {
                    tracing::warn!(error = %e, "failed to record mistake");
                    display.show_notice(&format!(
                        "Could not record mistake: {e}. Answer again to retry."
                    ))?;
                    None
                }
                Err(e) => return Err(e.into()),
            },
            Some(Action::Quit) => break,
            None => {
                display.show_help()?;
                None
            }
        };

        if let Some(Transition::ReviewStarted { questions }) = transition {
            display.show_notice(&format!("Reviewing mistakes... ({questions} to go)"))?;
        }
    }

    let Some(session) = trainer.session() else {
        return Ok(());
    };
    let report = session.report();

    if report.completed() {
        display.show_notice("Training session completed!")?;
    } else {
        display.show_notice("\nSession ended early.")?;
    }
    if options.record_mistakes {
        let notice = match &report.mistake_log {
            Some(path) => format!("Mistakes saved to: {}", path.display()),
            None => "No mistakes recorded.".to_string(),
        };
        display.show_notice(&notice)?;
    }
    display.show_summary(&report)?;

    if let Some(path) = &args.report {
        report.save_json(path)?;
        eprintln!("Session report: {}", path.display());
    }

    Ok(())
}
