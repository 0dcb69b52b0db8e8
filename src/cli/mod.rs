//! CLI orchestration (C13): thin `clap` subcommands that delegate to the
//! core solvers and to the correlation/result-file collaborators (C14/C15).
//! Mirrors the shape of the teacher's `app/solve_command.rs` entrypoint, with
//! `clap`'s derive API in place of `crusti_app_helper`.

mod classify;
mod correlation;
pub mod logging;
mod report;
mod resultfiles;
mod run;

mod discovery;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// argrank: ranking-based semantics over abstract argumentation frameworks.
#[derive(Debug, Parser)]
#[command(name = "argrank", version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a benchmark tree and emit a structural-properties CSV.
    Classify {
        /// Root directory to search for `.af` files.
        benchmark_dir: PathBuf,
        /// Directory containing per-framework result files (for status).
        results_dir: PathBuf,
        /// Path of the CSV to write.
        #[arg(short = 'o', long = "output", default_value = "classification.csv")]
        output: PathBuf,
    },
    /// Run every applicable semantics against each framework under a
    /// 600-second timeout, writing result CSVs or timeout sentinels.
    Run {
        /// Root directory to search for `.af` files.
        benchmark_dir: PathBuf,
        /// Directory to write per-framework result files into.
        results_dir: PathBuf,
    },
    /// Aggregate per-framework result CSVs into mean/median/stddev matrices.
    Report {
        /// Directory containing per-framework result files.
        results_dir: PathBuf,
        /// Directory containing `.af` files, used for stratification.
        benchmark_dir: PathBuf,
        /// Path of the aggregate report CSV to write.
        #[arg(short = 'o', long = "output", default_value = "report.csv")]
        output: PathBuf,
    },
}

/// Dispatches a parsed [`Cli`] to the matching subcommand. The returned
/// error, when present, is inspected by the binary entrypoint to select an
/// exit code per §6: `CoreError::InputError` maps to 1, anything else to 2.
pub fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Classify { benchmark_dir, results_dir, output } => {
            classify::run(&benchmark_dir, &results_dir, &output)
        }
        Command::Run { benchmark_dir, results_dir } => run::run(&benchmark_dir, &results_dir),
        Command::Report { results_dir, benchmark_dir, output } => {
            report::run(&results_dir, &benchmark_dir, &output)
        }
    }
}
