//! # Configuration Errors
//!
//! Structured error type for document loading and name-keyed lookup.
//! An unknown configuration name stops the pipeline, it never falls
//! through to a default; the typed variants let the CLI edge format the
//! failure consistently.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or querying the build-configuration model.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A build configuration name was looked up and not found.
    #[error("build configuration '{name}' not found")]
    ConfigurationNotFound {
        /// The requested configuration name.
        name: String,
    },

    /// A variant name was looked up within a configuration and not found.
    #[error("variant '{variant}' not found in build configuration '{config}'")]
    VariantNotFound {
        /// The configuration that was searched.
        config: String,
        /// The requested variant name.
        variant: String,
    },

    /// A source tree name was looked up and not found.
    #[error("tree '{name}' not found")]
    TreeNotFound {
        /// The requested tree name.
        name: String,
    },

    /// A build environment name was looked up and not found.
    #[error("build environment '{name}' not found")]
    EnvironmentNotFound {
        /// The requested environment name.
        name: String,
    },

    /// A config fragment name was looked up and not found.
    #[error("config fragment '{name}' not found")]
    FragmentNotFound {
        /// The requested fragment name.
        name: String,
    },

    /// An architecture has no toolchain mapping in a build environment.
    #[error("architecture '{arch}' has no toolchain in build environment '{environment}'")]
    ToolchainNotMapped {
        /// The environment that was consulted.
        environment: String,
        /// The architecture name with no mapping.
        arch: String,
    },

    /// A configuration references a tree name the document does not define.
    #[error("build configuration '{config}' references unknown tree '{tree}'")]
    UnknownTreeReference {
        /// The referencing configuration.
        config: String,
        /// The dangling tree name.
        tree: String,
    },

    /// A variant references a build environment the document does not define.
    #[error(
        "variant '{variant}' of build configuration '{config}' references \
         unknown build environment '{environment}'"
    )]
    UnknownEnvironmentReference {
        /// The configuration owning the variant.
        config: String,
        /// The referencing variant.
        variant: String,
        /// The dangling environment name.
        environment: String,
    },

    /// A variant references a config fragment the document does not define.
    #[error(
        "variant '{variant}' of build configuration '{config}' references \
         unknown fragment '{fragment}'"
    )]
    UnknownFragmentReference {
        /// The configuration owning the variant.
        config: String,
        /// The referencing variant.
        variant: String,
        /// The dangling fragment name.
        fragment: String,
    },

    /// The document file could not be read.
    #[error("failed to read build configs from '{path}': {source}")]
    Io {
        /// Path to the document that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document was not valid YAML for the expected schema.
    #[error("failed to parse build configs: {0}")]
    Parse(#[from] serde_yaml::Error),
}
