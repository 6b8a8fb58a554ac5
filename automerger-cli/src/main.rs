//! Automerger CLI - merge one GitHub branch into another
//!
//! Opens a pull request from the head branch into the base branch and
//! tries to merge it. The exit code is 0 when the branches were merged (or
//! there was nothing to merge) and 1 whenever a human needs to look, so CI
//! jobs can gate on it.

mod commands;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{MergeArgs, MergeError};

/// Merge two branches of a GitHub repository through a pull request
#[derive(Parser, Debug)]
#[command(name = "automerger")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Recommended reading: https://help.github.com/articles/using-pull-requests/")]
struct Cli {
    /// Log every API request and response
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    merge: MergeArgs,
}

/// Default filter when RUST_LOG is unset; verbose only raises our own crates
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,automerger=debug,automerger_core=debug,automerger_github=debug"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // stdout is reserved for the result messages
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Print usage to stdout and fail with exit code 1
fn usage_failure(reason: &str) -> ExitCode {
    let reason = reason.trim_end();
    eprintln!("error: {}", reason.strip_prefix("error: ").unwrap_or(reason));
    println!("{}", Cli::command().render_help());
    ExitCode::from(1)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                return ExitCode::SUCCESS;
            }
            _ => {
                let reason = err.to_string();
                return usage_failure(reason.lines().next().unwrap_or("invalid arguments"));
            }
        },
    };

    init_tracing(cli.verbose);

    match cli.merge.execute(cli.verbose).await {
        Ok(resolution) => {
            println!("{}", resolution);
            ExitCode::from(resolution.exit_code())
        }
        Err(MergeError::Usage(reason)) => usage_failure(&reason),
        Err(MergeError::Setup(err)) => {
            println!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
