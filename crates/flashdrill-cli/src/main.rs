//! flashdrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod display;
mod input;

use commands::train::TrainArgs;

#[derive(Parser)]
#[command(
    name = "flashdrill",
    version,
    about = "CSV flashcard trainer for vocabulary and verb conjugation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive training session
    Train(TrainArgs),

    /// Check that a CSV file loads for a training mode
    Validate {
        /// CSV file to check
        #[arg(long)]
        file: PathBuf,

        /// Training mode: vocabulary or verb
        #[arg(long, default_value = "vocabulary")]
        mode: String,
    },

    /// Create a starter config and sample data sets
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train(args) => commands::train::execute(args),
        Commands::Validate { file, mode } => commands::validate::execute(file, mode),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
