mod cli;
mod commands;
mod error;
mod metadata;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let output = commands::run(&cli).await?;
    output::render(&output, cli.format, cli.pretty, cli.out.as_deref())?;

    // Per-source failures ride inside the envelope and leave the exit
    // code at zero unless --strict promotes them.
    if cli.strict
        && (!output.envelope.meta.warnings.is_empty() || !output.envelope.errors.is_empty())
    {
        return Err(CliError::StrictModeViolation {
            warning_count: output.envelope.meta.warnings.len(),
            error_count: output.envelope.errors.len(),
        });
    }

    Ok(ExitCode::SUCCESS)
}
