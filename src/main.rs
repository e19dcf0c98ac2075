//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use antgraph::project::ProjectError;
use antgraph::{
    cli::Cli,
    runner::{self, RunnerError},
};
use clap::{CommandFactory, Parser};
use std::io;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.log_level())
        .init();
    match runner::run(&cli) {
        Ok(outcomes) => {
            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            if failed > 0 {
                warn!(failed, requested = outcomes.len(), "some formats were not rendered");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(err);
            ExitCode::FAILURE
        }
    }
}

/// Log `err`, rendering build-file diagnostics with their source snippet.
fn report(err: anyhow::Error) {
    let other = match err.downcast::<ProjectError>() {
        Ok(diag) => {
            error!("{:?}", miette::Report::new(diag));
            return;
        }
        Err(other) => other,
    };
    error!(error = %other, "antgraph failed");
    if matches!(
        other.downcast_ref::<RunnerError>(),
        Some(RunnerError::MissingInput)
    ) {
        error!("{}", Cli::command().render_usage());
    }
}
