//! # kforge-build — External Build Operations
//!
//! The collaborator layer the `kforge` commands delegate to. Commands are
//! thin adapters over the configuration model; everything that touches a
//! git repository, the storage server, or the checkout's filesystem lives
//! here, behind the [`BuildOps`] trait so command contracts can be tested
//! against recording doubles.
//!
//! ## Layers
//!
//! - [`git`] — subprocess wrappers over the `git` binary: remote head
//!   queries, mirror clones, reference-seeded checkouts, describe output.
//! - [`client`] — blocking HTTP clients for the storage file server and
//!   the build API (last-commit tracking, tarball upload).
//! - [`fragments`] — materializes the config fragments a configuration's
//!   variants reference into the checkout directory.
//! - [`tarball`] — `git archive` packaging and content digests.
//! - [`ops`] — the [`BuildOps`] trait and [`KernelOps`], the production
//!   implementation wiring the layers together.
//!
//! ## Crate Policy
//!
//! One command, one invocation, one process: every operation here is
//! synchronous and blocking. Failures surface as [`OpsError`]; there is
//! no retry or cancellation at this layer.

pub mod client;
pub mod error;
pub mod fragments;
pub mod git;
pub mod ops;
pub mod tarball;

pub use error::OpsError;
pub use ops::{BuildOps, CommitUpdate, KernelOps, KernelTarget};
