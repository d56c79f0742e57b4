//! `fabricator` binary.

use std::process::ExitCode;

use clap::Parser;
use fabricator_cli::{CliArgs, FabricatorCli};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let cli = match FabricatorCli::from_args("fabricator", &args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    match cli.run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
