//! # kforge-cli — CI Pipeline Command-Line Front End
//!
//! Provides the `kforge` binary: one sub-command per orchestration step
//! of the kernel build pipeline. Commands are thin adapters — they read
//! the loaded [`kforge_config::BuildConfigs`] model, delegate real work
//! to [`kforge_build::BuildOps`], and report a [`CommandOutcome`].
//!
//! ## Sub-commands
//!
//! - `list-configs`, `list-variants`, `arch-list`, `tree-branch`,
//!   `build-environment` — read-only queries over the build matrix.
//! - `check-new-commit`, `update-last-commit`, `update-mirror`,
//!   `update-repo`, `describe` — source synchronization steps.
//! - `generate-fragments`, `push-tarball`, `list-kernel-configs` —
//!   build-input preparation steps.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers; handlers take parsed
//!   args, the loaded document, and a `&dyn BuildOps`, and never touch
//!   the process environment, so command contracts are testable with
//!   recording doubles.
//! - Handlers do not print success output themselves; query results
//!   travel in [`CommandOutcome::Info`] and the dispatcher prints them.

pub mod args;
pub mod artifacts;
pub mod cli;
pub mod configs;
pub mod source;

/// Tagged result of one command invocation.
///
/// The dispatcher maps this to process state: `Success` exits 0,
/// `Failure` exits 1, and `Info` prints its payload and exits 0 — the
/// convenience for query commands whose natural result is data, not a
/// verdict. Operational errors travel as `Err(_)` and exit 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The operation completed; nothing to print.
    Success,
    /// The operation failed cleanly; exit 1.
    Failure,
    /// The operation produced data to print; treated as success.
    Info(String),
}
