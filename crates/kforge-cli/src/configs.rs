//! # Matrix Query Commands
//!
//! Read-only commands over the build-configuration model: no delegation,
//! no side effects beyond the printed result. Each walks the loaded
//! document and reports through [`CommandOutcome::Info`].

use anyhow::Result;
use clap::Args;

use kforge_config::BuildConfigs;

use crate::args::{ConfigArg, VariantArg};
use crate::CommandOutcome;

/// Render a sequence as one printed line per item, or plain success when
/// the sequence is empty.
fn lines_outcome<I, S>(lines: I) -> CommandOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = lines
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    if joined.is_empty() {
        CommandOutcome::Success
    } else {
        CommandOutcome::Info(joined)
    }
}

/// List every build configuration name, in document order.
pub fn run_list_configs(configs: &BuildConfigs) -> Result<CommandOutcome> {
    Ok(lines_outcome(configs.configs().map(|c| c.name.as_str())))
}

/// Arguments for the `tree-branch` sub-command.
#[derive(Args, Debug)]
pub struct TreeBranchArgs {
    #[command(flatten)]
    pub config: ConfigArg,
}

/// Print tree name, tree URL, and branch — three lines, fixed order.
pub fn run_tree_branch(args: &TreeBranchArgs, configs: &BuildConfigs) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    Ok(CommandOutcome::Info(format!(
        "{}\n{}\n{}",
        config.tree.name, config.tree.url, config.branch
    )))
}

/// Arguments for the `list-variants` sub-command.
#[derive(Args, Debug)]
pub struct ListVariantsArgs {
    #[command(flatten)]
    pub config: ConfigArg,
}

/// List a configuration's variant names, in declared order.
pub fn run_list_variants(
    args: &ListVariantsArgs,
    configs: &BuildConfigs,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    Ok(lines_outcome(config.variant_names()))
}

/// Arguments for the `arch-list` sub-command.
#[derive(Args, Debug)]
pub struct ArchListArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub variant: VariantArg,
}

/// List a variant's architecture names, in declared order.
pub fn run_arch_list(args: &ArchListArgs, configs: &BuildConfigs) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    let variant = config.variant(&args.variant.variant)?;
    Ok(lines_outcome(&variant.architectures))
}

/// Arguments for the `build-environment` sub-command.
#[derive(Args, Debug)]
pub struct BuildEnvironmentArgs {
    #[command(flatten)]
    pub config: ConfigArg,
    #[command(flatten)]
    pub variant: VariantArg,
    /// Architecture to resolve a toolchain for.
    #[arg(long)]
    pub arch: Option<String>,
}

/// Print environment name, compiler, and compiler version; with `--arch`,
/// additionally the architecture's resolved toolchain.
pub fn run_build_environment(
    args: &BuildEnvironmentArgs,
    configs: &BuildConfigs,
) -> Result<CommandOutcome> {
    let config = configs.config(&args.config.config)?;
    let variant = config.variant(&args.variant.variant)?;
    let environment = configs.environment(&variant.build_environment)?;

    let mut lines = vec![
        environment.name.clone(),
        environment.cc.clone(),
        environment.cc_version.clone(),
    ];
    if let Some(ref arch) = args.arch {
        lines.push(environment.toolchain(arch)?.to_string());
    }
    Ok(CommandOutcome::Info(lines.join("\n")))
}
