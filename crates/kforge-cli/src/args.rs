//! # Shared Argument Descriptors
//!
//! The reusable argument catalogue: each descriptor is declared once,
//! with its help text and default, and flattened into the sub-commands
//! that bind it. A command that needs a normally-required descriptor as
//! optional declares an `Option` field of its own instead (see
//! `update-repo`'s mirror).

use std::path::PathBuf;

use clap::Args;
use url::Url;

/// Default storage file-server URL.
pub const STORAGE_URL_DEFAULT: &str = "https://storage.kforge.org";

/// Default build API URL.
pub const API_URL_DEFAULT: &str = "https://api.kforge.org";

/// Build configuration selector.
#[derive(Args, Debug, Clone)]
pub struct ConfigArg {
    /// Name of the build configuration.
    #[arg(long)]
    pub config: String,
}

/// Variant selector within a configuration.
#[derive(Args, Debug, Clone)]
pub struct VariantArg {
    /// Name of the variant.
    #[arg(long)]
    pub variant: String,
}

/// Kernel checkout directory.
#[derive(Args, Debug, Clone)]
pub struct KdirArg {
    /// Path to the kernel checkout directory.
    #[arg(long)]
    pub kdir: PathBuf,
}

/// Storage file-server endpoint.
#[derive(Args, Debug, Clone)]
pub struct StorageArg {
    /// Storage server URL.
    #[arg(long, default_value = STORAGE_URL_DEFAULT)]
    pub storage: Url,
}

/// Build API endpoint.
#[derive(Args, Debug, Clone)]
pub struct ApiArg {
    /// Build API URL.
    #[arg(long, default_value = API_URL_DEFAULT)]
    pub api: Url,
}

/// API authentication token.
#[derive(Args, Debug, Clone)]
pub struct TokenArg {
    /// API authentication token.
    #[arg(long)]
    pub token: String,
}
