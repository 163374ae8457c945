//! Command line argument parsing for the collegebot CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// collegebot - a help desk chatbot for college FAQs
#[derive(Parser, Debug, Clone)]
#[command(name = "collegebot")]
#[command(about = "A help desk chatbot answering common college questions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BotArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "COLLEGEBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Intent catalog file (JSON); the built-in catalog is used when omitted
    #[arg(long, value_name = "CATALOG_FILE", env = "COLLEGEBOT_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive chat session
    Chat(ChatArgs),

    /// Answer a single question
    Ask(AskArgs),

    /// Train the classifier and write a model file
    Train(TrainArgs),

    /// Validate the intent catalog
    Validate,
}

/// Where the classifier comes from.
#[derive(Parser, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Trained model file; the classifier is trained in memory when omitted
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Seed for response selection, for reproducible replies
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for an interactive session
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Save the transcript as JSON when the session ends
    #[arg(short, long, value_name = "TRANSCRIPT_FILE")]
    pub transcript: Option<PathBuf>,
}

/// Arguments for a single question
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The question to answer
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

impl AskArgs {
    /// The question words joined with spaces.
    pub fn text(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Output model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,

    /// Overwrite an existing model file
    #[arg(long)]
    pub force: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
