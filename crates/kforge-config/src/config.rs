//! # Build Configuration
//!
//! One named unit of the build matrix: a source tree and branch tied to
//! an ordered list of variants. The tree is resolved and embedded when
//! the document is loaded; variants keep name references to their build
//! environments and fragments.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tree::Tree;
use crate::variant::Variant;

/// A named build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Configuration name, the document-wide lookup key.
    pub name: String,
    /// The source tree this configuration tracks.
    pub tree: Tree,
    /// Branch built from the tree.
    pub branch: String,
    /// Variants in declared order.
    pub variants: Vec<Variant>,
}

impl BuildConfig {
    /// Look up a variant by name.
    ///
    /// An unknown variant name is a typed error; there is no default.
    pub fn variant(&self, name: &str) -> Result<&Variant, ConfigError> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| ConfigError::VariantNotFound {
                config: self.name.clone(),
                variant: name.to_string(),
            })
    }

    /// Iterate variant names in declared order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }
}
