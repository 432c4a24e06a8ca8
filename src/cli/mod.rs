// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All work is
// delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `run`    — train a variant and print its evaluation
//   2. `encode` — print the vocabulary encoding of a text
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use burn::backend::{
    ndarray::NdArrayDevice,
    wgpu::WgpuDevice,
    Autodiff, NdArray, Wgpu,
};
use clap::Parser;
use commands::{BackendArg, Commands, EncodeArgs, RunArgs};

use crate::application::pipeline::{Evaluation, PipelineReport, PipelineRunner};

#[derive(Parser, Debug)]
#[command(
    name = "minitrain",
    version = "0.1.0",
    about = "Train small text classifiers or a pendulum regressor, then evaluate them."
)]
pub struct Cli {
    /// The subcommand to run (run or encode)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)    => run_pipeline(args),
            Commands::Encode(args) => run_encode(args),
        }
    }
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    let runner = PipelineRunner::new(args.to_config()?)?;

    let report = match args.backend {
        BackendArg::Ndarray => {
            let device = NdArrayDevice::default();
            tracing::info!("Using NdArray device: {:?}", device);
            runner.run::<Autodiff<NdArray>>(&device)?
        }
        BackendArg::Wgpu => {
            let device = WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            runner.run::<Autodiff<Wgpu>>(&device)?
        }
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &PipelineReport) {
    match &report.evaluation {
        Evaluation::Text { predictions } => {
            for p in predictions {
                println!("Text: {}", p.text);
                println!("Predicted label: [{:.6}]", p.probability);
            }
        }
        Evaluation::Pendulum { mse, samples, plot_path } => {
            println!("Test MSE over {} states: {:.6}", samples, mse);
            println!("Plot saved to: {}", plot_path.display());
        }
    }
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let runner  = PipelineRunner::new(args.to_config()?)?;
    let encoded = runner.encode_text(&args.text)?;

    println!("Vocabulary size: {}", encoded.vocabulary_size);
    for t in &encoded.tokens {
        match t.index {
            Some(i) => println!("  {:<20} → {:>6}  (seen {} times)", t.token, i, t.count),
            None    => println!("  {:<20} → unknown", t.token),
        }
    }
    println!("Ids:     {:?}", encoded.ids);
    println!("Padded:  {:?}", encoded.padded);
    println!("Decoded: {}", encoded.decoded.join(" "));
    Ok(())
}
