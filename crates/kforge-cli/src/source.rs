//! # Source Synchronization Commands
//!
//! The steps that keep mirrors and checkouts in sync with the tracked
//! tree and the pipeline's last-built-commit record. All real work is
//! delegated to [`BuildOps`]; handlers only map delegation results onto
//! the tagged [`CommandOutcome`].

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use kforge_build::{BuildOps, CommitUpdate};
use kforge_config::BuildConfigs;

use crate::args::{ApiArg, ConfigArg, KdirArg, StorageArg, TokenArg};
use crate::CommandOutcome;

/// Arguments for the `check-new-commit` sub-command.
#[derive(Args, Debug)]
pub struct CheckNewCommitArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub storage: StorageArg,
}

/// Compare the remote branch head with the last built commit.
///
/// Exit status is the signal CI reads: a pending build (first build or
/// new commit) succeeds, an up-to-date branch fails cleanly so the
/// pipeline skips. A new commit additionally prints its hash.
pub fn run_check_new_commit(
    args: &CheckNewCommitArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    Ok(
        match ops.check_new_commit(config, &args.storage.storage)? {
            CommitUpdate::NeverBuilt => CommandOutcome::Success,
            CommitUpdate::UpToDate => CommandOutcome::Failure,
            CommitUpdate::New(commit) => CommandOutcome::Info(commit),
        },
    )
}

/// Arguments for the `update-last-commit` sub-command.
#[derive(Args, Debug)]
pub struct UpdateLastCommitArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub api: ApiArg,
    #[command(flatten)]
    pub token: TokenArg,
    /// Commit checksum to record as last built.
    #[arg(long)]
    pub commit: String,
}

/// Record the last built commit via the build API.
pub fn run_update_last_commit(
    args: &UpdateLastCommitArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    ops.update_last_commit(config, &args.api.api, &args.token.token, &args.commit)?;
    Ok(CommandOutcome::Success)
}

/// Arguments for the `update-mirror` sub-command.
#[derive(Args, Debug)]
pub struct UpdateMirrorArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    /// Path to the bare mirror.
    #[arg(long)]
    pub mirror: PathBuf,
}

/// Create or refresh the configuration's tree mirror.
pub fn run_update_mirror(
    args: &UpdateMirrorArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    ops.update_mirror(config, &args.mirror)?;
    Ok(CommandOutcome::Success)
}

/// Arguments for the `update-repo` sub-command.
#[derive(Args, Debug)]
pub struct UpdateRepoArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub kdir: KdirArg,
    /// Mirror to seed the clone from.
    #[arg(long)]
    pub mirror: Option<PathBuf>,
}

/// Synchronize the working checkout to the tracked branch head.
pub fn run_update_repo(
    args: &UpdateRepoArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    ops.update_repo(config, &args.kdir.kdir, args.mirror.as_deref())?;
    Ok(CommandOutcome::Success)
}

/// Arguments for the `describe` sub-command.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub kdir: KdirArg,
}

/// Print commit hash, short description, and verbose description of the
/// checkout's HEAD — exactly three lines. The verbose line falls back to
/// the short description when no release tag describes HEAD.
pub fn run_describe(
    args: &DescribeArgs,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    let commit = ops.head_commit(config, &args.kdir.kdir)?;
    let short = ops.describe(config, &args.kdir.kdir)?;
    let verbose = ops
        .describe_verbose(config, &args.kdir.kdir)?
        .unwrap_or_else(|| short.clone());
    Ok(CommandOutcome::Info(format!("{commit}\n{short}\n{verbose}")))
}
