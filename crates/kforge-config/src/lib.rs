//! # kforge-config — Build-Configuration Model
//!
//! This crate is the data model the `kforge` CLI walks. It loads the
//! declarative build-configuration document (`build-configs.yaml`) into a
//! strongly-typed graph and provides name-keyed lookup at every level:
//!
//! - **[`BuildConfigs`]** — the loaded document root: trees, fragments,
//!   build environments, and build configurations, in document order.
//! - **[`BuildConfig`]** — one named unit of the build matrix: a source
//!   tree and branch plus an ordered list of variants.
//! - **[`Variant`]** — a configuration's sub-unit: target architectures,
//!   a build environment reference, and config fragment references.
//! - **[`BuildEnvironment`]** — compiler identity and version with a
//!   per-architecture toolchain mapping, shared by name across variants.
//!
//! ## Design
//!
//! References between document sections (configuration → tree, variant →
//! environment, variant → fragment) are stored as names and resolved
//! through the document, never as ownership edges. Every reference is
//! checked once at load time, so a dangling name surfaces as a structured
//! [`ConfigError`] when the document is read, not as a deferred lookup
//! failure deep inside a command.
//!
//! Runtime lookups driven by user input (`config(name)`, `variant(name)`)
//! keep fail-fast semantics: an unknown name is a typed error, never a
//! silent default.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `kforge-*` crates (leaf of the DAG).
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Every model node derives `Debug`, `Clone`, and
//!   `Serialize`/`Deserialize`; the document root is built by the
//!   resolution pass, never deserialized directly.

pub mod config;
pub mod document;
pub mod environment;
pub mod error;
pub mod fragment;
pub mod tree;
pub mod variant;

pub use config::BuildConfig;
pub use document::BuildConfigs;
pub use environment::BuildEnvironment;
pub use error::ConfigError;
pub use fragment::ConfigFragment;
pub use tree::Tree;
pub use variant::Variant;
