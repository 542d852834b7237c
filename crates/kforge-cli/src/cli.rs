//! # Parser and Dispatch Table
//!
//! The clap command tree is the dispatch table: one enum variant per
//! sub-command, each carrying its parsed arguments, with the sub-command
//! name derived from the variant name. [`dispatch`] selects and invokes
//! exactly one handler for the parsed variant.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use kforge_build::BuildOps;
use kforge_config::BuildConfigs;

use crate::artifacts::{
    GenerateFragmentsArgs, ListKernelConfigsArgs, PushTarballArgs,
};
use crate::configs::{ArchListArgs, BuildEnvironmentArgs, ListVariantsArgs, TreeBranchArgs};
use crate::source::{
    CheckNewCommitArgs, DescribeArgs, UpdateLastCommitArgs, UpdateMirrorArgs, UpdateRepoArgs,
};
use crate::{artifacts, configs, source, CommandOutcome};

/// kforge — CI front end for the kernel build pipeline.
///
/// Reads the declarative build-configuration document and carries out
/// one orchestration step per invocation: list configurations, check for
/// new commits, synchronize mirrors and checkouts, generate config
/// fragments, publish source tarballs, or enumerate build targets.
#[derive(Parser, Debug)]
#[command(name = "kforge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the declarative build-configuration document.
    #[arg(long, global = true, default_value = "build-configs.yaml")]
    pub build_configs: PathBuf,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// The sub-command set. Variant names are the registration convention:
/// each derives its public sub-command name.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every build configuration in the document.
    ListConfigs,

    /// Check whether the tracked branch has a commit newer than the last build.
    CheckNewCommit(CheckNewCommitArgs),

    /// Record the last built commit via the build API.
    UpdateLastCommit(UpdateLastCommitArgs),

    /// Print tree name, tree URL, and branch for a configuration.
    TreeBranch(TreeBranchArgs),

    /// Create or refresh a bare mirror of the configuration's tree.
    UpdateMirror(UpdateMirrorArgs),

    /// Synchronize a working checkout to the tracked branch head.
    UpdateRepo(UpdateRepoArgs),

    /// Print commit hash and descriptions of the checkout's HEAD.
    Describe(DescribeArgs),

    /// Write the configuration's config fragments into the checkout.
    GenerateFragments(GenerateFragmentsArgs),

    /// Package the checkout into a source tarball and upload it.
    PushTarball(PushTarballArgs),

    /// List a configuration's variant names.
    ListVariants(ListVariantsArgs),

    /// List a variant's architecture names.
    ArchList(ArchListArgs),

    /// Print a variant's build environment, optionally with a toolchain.
    BuildEnvironment(BuildEnvironmentArgs),

    /// Enumerate per-target build specs for a configuration.
    ListKernelConfigs(ListKernelConfigsArgs),
}

/// Select and invoke exactly one command handler.
pub fn dispatch(
    command: &Commands,
    configs: &BuildConfigs,
    ops: &dyn BuildOps,
) -> Result<CommandOutcome> {
    match command {
        Commands::ListConfigs => configs::run_list_configs(configs),
        Commands::CheckNewCommit(args) => source::run_check_new_commit(args, configs, ops),
        Commands::UpdateLastCommit(args) => source::run_update_last_commit(args, configs, ops),
        Commands::TreeBranch(args) => configs::run_tree_branch(args, configs),
        Commands::UpdateMirror(args) => source::run_update_mirror(args, configs, ops),
        Commands::UpdateRepo(args) => source::run_update_repo(args, configs, ops),
        Commands::Describe(args) => source::run_describe(args, configs, ops),
        Commands::GenerateFragments(args) => {
            artifacts::run_generate_fragments(args, configs, ops)
        }
        Commands::PushTarball(args) => artifacts::run_push_tarball(args, configs, ops),
        Commands::ListVariants(args) => configs::run_list_variants(args, configs),
        Commands::ArchList(args) => configs::run_arch_list(args, configs),
        Commands::BuildEnvironment(args) => configs::run_build_environment(args, configs),
        Commands::ListKernelConfigs(args) => {
            artifacts::run_list_kernel_configs(args, configs, ops)
        }
    }
}
