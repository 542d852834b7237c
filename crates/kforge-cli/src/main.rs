//! # kforge entry point
//!
//! Parses command-line arguments, loads the build-configuration
//! document, and dispatches to exactly one sub-command handler.
//!
//! Exit status: 0 on success (including informational results, which are
//! printed), 1 when a command fails cleanly, 2 on operational errors —
//! unknown configuration names, delegation failures, unreadable
//! documents.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kforge_build::KernelOps;
use kforge_cli::cli::{dispatch, Cli};
use kforge_cli::CommandOutcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Verbosity maps onto the tracing filter; RUST_LOG still wins when set.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let configs = kforge_config::BuildConfigs::load(&cli.build_configs).with_context(|| {
        format!(
            "failed to load build configs from '{}'",
            cli.build_configs.display()
        )
    })?;

    tracing::debug!(
        configs = configs.configs().count(),
        document = %cli.build_configs.display(),
        "loaded build-configuration document"
    );

    let ops = KernelOps::new();
    let outcome = dispatch(&cli.command, &configs, &ops)?;

    Ok(match outcome {
        CommandOutcome::Success => ExitCode::SUCCESS,
        CommandOutcome::Failure => ExitCode::from(1),
        CommandOutcome::Info(payload) => {
            println!("{payload}");
            ExitCode::SUCCESS
        }
    })
}
