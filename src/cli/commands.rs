// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `train`, `translate` and `stats`.
//
// clap's derive macros generate --help, missing-argument errors
// and string → number/enum conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::domain::topology::Topology;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a translation model on a parallel corpus
    Train(TrainArgs),

    /// Translate a sentence with a trained model
    Translate(TranslateArgs),

    /// Print word statistics for a parallel corpus
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Source-language file, one sentence per line
    #[arg(long)]
    pub source: String,

    /// Target-language file, line-aligned with --source
    #[arg(long)]
    pub target: String,

    /// Where the model, vocabularies and metrics are written
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// Network shape
    #[arg(long, value_enum, default_value_t = Topology::Plain)]
    pub topology: Topology,

    #[arg(long, default_value_t = 1024)]
    pub batch_size: usize,

    /// Full passes over the training split
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.005)]
    pub lr: f64,

    /// Fraction of pairs held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub validation_split: f64,

    /// Shuffle pairs before the split (the last pairs are held out otherwise)
    #[arg(long)]
    pub shuffle_seed: Option<u64>,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            source_path:      a.source,
            target_path:      a.target,
            artifact_dir:     a.artifact_dir,
            topology:         a.topology,
            batch_size:       a.batch_size,
            epochs:           a.epochs,
            lr:               a.lr,
            validation_split: a.validation_split,
            shuffle_seed:     a.shuffle_seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Sentence in the source language, words separated by spaces
    #[arg(long)]
    pub sentence: String,

    /// Directory written by `train`
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// Also print the padded per-position output
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long)]
    pub source: String,

    #[arg(long)]
    pub target: String,

    /// How many of the most common words to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}
