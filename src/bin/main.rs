//! The `argrank` binary entrypoint: parses the CLI, initialises logging,
//! dispatches to the subcommand, and maps the result onto the exit codes of
//! §6 (0 = success, 1 = input error, 2 = internal error).

use argrank::cli::{self, Cli};
use argrank::CoreError;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    match cli::dispatch(cli) {
        Ok(()) => ExitCode::from(0),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::InputError(_)) => 1,
        _ => {
            if err.chain().any(|cause| cause.downcast_ref::<std::io::Error>().is_some()) {
                1
            } else {
                2
            }
        }
    }
}
