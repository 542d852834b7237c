//! # Build Environment
//!
//! Compiler identity and version plus the per-architecture toolchain
//! mapping. Environments are defined once in the document and shared by
//! name across any variants that reference them — their lifetime is the
//! lifetime of the loaded document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named build environment: which compiler builds a variant, and which
/// cross-toolchain prefix each architecture resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnvironment {
    /// Environment name, e.g. `gcc-12` or `clang-17`.
    pub name: String,
    /// Compiler identifier, e.g. `gcc` or `clang`.
    pub cc: String,
    /// Compiler version string.
    pub cc_version: String,
    /// Architecture name to toolchain-triple prefix mapping.
    #[serde(default)]
    pub arch_map: BTreeMap<String, String>,
}

impl BuildEnvironment {
    /// Resolve the toolchain prefix for an architecture.
    ///
    /// An architecture absent from the mapping is a typed error rather
    /// than a silent default: the mapping is the single source of truth
    /// for which targets this environment can cross-compile.
    pub fn toolchain(&self, arch: &str) -> Result<&str, ConfigError> {
        self.arch_map
            .get(arch)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::ToolchainNotMapped {
                environment: self.name.clone(),
                arch: arch.to_string(),
            })
    }
}
