//! # Build-Input Preparation Commands
//!
//! Fragment generation, source tarball publication, and build-target
//! enumeration — the steps that turn a synchronized checkout into the
//! inputs the build farm consumes.

use anyhow::Result;
use clap::Args;

use kforge_build::BuildOps;
use kforge_config::BuildConfigs;

use crate::args::{ApiArg, ConfigArg, KdirArg, StorageArg, TokenArg};
use crate::CommandOutcome;

/// Arguments for the `generate-fragments` sub-command.
#[derive(Args, Debug)]
pub struct GenerateFragmentsArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub kdir: KdirArg,
}

/// Write the configuration's config fragments into the checkout.
pub fn run_generate_fragments(
    args: &GenerateFragmentsArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    let written = ops.generate_fragments(configs, config, &args.kdir.kdir)?;
    tracing::info!(count = written.len(), "generated config fragments");
    Ok(CommandOutcome::Success)
}

/// Arguments for the `push-tarball` sub-command.
#[derive(Args, Debug)]
pub struct PushTarballArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub kdir: KdirArg,
    #[command(flatten)]
    pub storage: StorageArg,
    #[command(flatten)]
    pub api: ApiArg,
    #[command(flatten)]
    pub token: TokenArg,
}

impl PushTarballArgs {
    /// All five resolved values must carry real content before any
    /// delegation happens.
    fn valid(&self) -> bool {
        !self.config.config.is_empty()
            && !self.kdir.kdir.as_os_str().is_empty()
            && self.storage.storage.has_host()
            && self.api.api.has_host()
            && !self.token.token.is_empty()
    }
}

/// Package the checkout into a source tarball, upload it, and print its
/// public URL.
pub fn run_push_tarball(
    args: &PushTarballArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    if !args.valid() {
        println!("Invalid arguments");
        return Ok(CommandOutcome::Failure);
    }

    let config = configs.config(&args.config.config)?;
    match ops.push_tarball(
        config,
        &args.kdir.kdir,
        &args.storage.storage,
        &args.api.api,
        &args.token.token,
    )? {
        Some(url) => Ok(CommandOutcome::Info(url.to_string())),
        None => Ok(CommandOutcome::Failure),
    }
}

/// Arguments for the `list-kernel-configs` sub-command.
#[derive(Args, Debug)]
pub struct ListKernelConfigsArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub kdir: KdirArg,
    /// Restrict to one variant.
    #[arg(long)]
    pub variant: Option<String>,
    /// Restrict to one architecture.
    #[arg(long)]
    pub arch: Option<String>,
}

/// Enumerate per-target build specs, one whitespace-joined tuple per line.
pub fn run_list_kernel_configs(
    args: &ListKernelConfigsArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    let targets = ops.list_kernel_configs(
        configs,
        config,
        &args.kdir.kdir,
        args.variant.as_deref(),
        args.arch.as_deref(),
    )?;

    if targets.is_empty() {
        return Ok(CommandOutcome::Success);
    }
    Ok(CommandOutcome::Info(
        targets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    ))
}
