// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// Business logic lives in Layer 2 (application); this layer
// routes and prints.
//
//   1. `train`     — trains a model on a parallel corpus
//   2. `translate` — loads artifacts and translates a sentence
//   3. `stats`     — word statistics for a parallel corpus
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, StatsArgs, TrainArgs, TranslateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "rnn-translator",
    version,
    about = "Train a recurrent word-level translator on a parallel corpus, then translate sentences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)     => run_train(args),
            Commands::Translate(args) => run_translate(args),
            Commands::Stats(args)     => run_stats(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!(
        "Training {} model on '{}' → '{}'",
        args.topology,
        args.source,
        args.target
    );

    let report = TrainUseCase::new(args.into()).execute()?;

    println!(
        "Vocabularies: {} source words, {} target words; sequence length {}",
        report.source_vocab, report.target_vocab, report.max_length
    );

    if let Some(last) = report.history.last() {
        println!(
            "Final epoch: loss={:.4} acc={:.1}% val_loss={:.4} val_acc={:.1}%",
            last.train_loss,
            last.train_acc * 100.0,
            last.val_loss,
            last.val_acc * 100.0,
        );
    }
    if let Some(best) = report.history.best() {
        println!("Best validation loss {:.4} at epoch {}", best.val_loss, best.epoch);
    }

    let (input, reference, output) = &report.sample;
    println!("\nInput:     {input}");
    println!("Reference: {reference}");
    println!("Output:    {output}");
    println!("\nArtifacts saved to '{}'.", report.artifact_dir);
    Ok(())
}

fn run_translate(args: TranslateArgs) -> Result<()> {
    use crate::application::translate_use_case::TranslateUseCase;

    let use_case: TranslateUseCase = TranslateUseCase::open(&args.artifact_dir)?;
    let translation = use_case.translate(&args.sentence)?;

    println!("{}", translation.text);
    if args.raw {
        println!("{}", translation.raw);
    }
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let report = StatsUseCase::new(args.source, args.target, args.top).execute()?;
    println!("{}\n", report.source.render("source"));
    println!("{}", report.target.render("target"));
    Ok(())
}
