//! `percolation` binary.
//!
//! `percolation stats <SIZE> <TRIALS>` estimates the percolation threshold
//! over many seeded trials; `percolation trial <SIZE>` opens one grid until
//! it percolates. The summary goes to stdout as `key = value` lines, and
//! diagnostics go to stderr through `tracing`. A failed command is logged
//! with its subcommand and stable error code, then exits with status 1.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use percolation_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main(cli: Cli) -> Result<()> {
    let command = cli.command.name();
    let summary = run_cli(cli).with_context(|| format!("`{command}` command failed"))?;
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut stdout)
        .and_then(|()| stdout.flush())
        .with_context(|| format!("failed to write `{command}` summary"))
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let command = cli.command.name();
    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<CliError>().map(CliError::code);
            error!(
                command,
                code = code.map(field::display),
                error = %format!("{err:#}"),
                "command execution failed"
            );
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "Logging is not installed yet, so stderr is the only channel"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("percolation: cannot initialise logging: {err}");
}
