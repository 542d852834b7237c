//! # Config Fragment Generation
//!
//! Materializes the config fragments a configuration's variants reference
//! into the checkout directory, one file per fragment at the fragment's
//! declared path.

use std::path::{Path, PathBuf};

use kforge_config::{BuildConfig, BuildConfigs};

use crate::error::OpsError;

/// Write every fragment referenced by `config`'s variants under `kdir`.
///
/// Fragments referenced by more than one variant are written once, in
/// first-reference order. Returns the written paths.
pub fn generate_fragments(
    doc: &BuildConfigs,
    config: &BuildConfig,
    kdir: &Path,
) -> Result<Vec<PathBuf>, OpsError> {
    let mut names: Vec<&str> = Vec::new();
    for variant in &config.variants {
        for name in &variant.fragments {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
    }

    let mut written = Vec::with_capacity(names.len());
    for name in names {
        let fragment = doc.fragment(name)?;
        let path = kdir.join(&fragment.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut content = format!("# {name}\n");
        for line in &fragment.configs {
            content.push_str(line);
            content.push('\n');
        }
        std::fs::write(&path, content)?;

        tracing::debug!(fragment = name, path = %path.display(), "wrote fragment");
        written.push(path);
    }

    Ok(written)
}
