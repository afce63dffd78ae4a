use std::io;
use std::process::ExitCode;

use clap::Parser;
use finance_ledger::cli::{execute, Cli};
use finance_ledger::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = cli.config();
    match execute(cli.command, &config, io::stdout().lock(), io::stderr().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
