//! # Document Root
//!
//! Loads the declarative build-configuration document into the typed
//! model and provides name-keyed lookup at each level.
//!
//! Loading is two-phase: structural deserialization into private raw
//! structs, then reference resolution. Every name reference in the
//! document — configuration → tree, variant → environment, variant →
//! fragment — is checked during resolution, so a dangling name is a
//! structured [`ConfigError`] at load time instead of a lookup failure
//! inside a command.
//!
//! Document order is meaningful: trees, fragments, environments, and
//! configurations are YAML sequences and keep their declared order.

use std::path::Path;

use serde::Deserialize;

use crate::config::BuildConfig;
use crate::environment::BuildEnvironment;
use crate::error::ConfigError;
use crate::fragment::ConfigFragment;
use crate::tree::Tree;
use crate::variant::Variant;

/// Structural form of the document before reference resolution.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    trees: Vec<Tree>,
    #[serde(default)]
    fragments: Vec<ConfigFragment>,
    build_environments: Vec<BuildEnvironment>,
    build_configs: Vec<RawBuildConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuildConfig {
    name: String,
    tree: String,
    branch: String,
    variants: Vec<Variant>,
}

/// The loaded build-configuration document.
///
/// Read-only for the lifetime of the process: commands look nodes up,
/// they never mutate the matrix.
#[derive(Debug, Clone)]
pub struct BuildConfigs {
    trees: Vec<Tree>,
    fragments: Vec<ConfigFragment>,
    environments: Vec<BuildEnvironment>,
    configs: Vec<BuildConfig>,
}

impl BuildConfigs {
    /// Load and resolve the document at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and resolve a document from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawDocument = serde_yaml::from_str(content)?;
        Self::resolve(raw)
    }

    /// Resolve raw name references into the typed graph.
    fn resolve(raw: RawDocument) -> Result<Self, ConfigError> {
        let mut configs = Vec::with_capacity(raw.build_configs.len());

        for config in raw.build_configs {
            let tree = raw
                .trees
                .iter()
                .find(|t| t.name == config.tree)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownTreeReference {
                    config: config.name.clone(),
                    tree: config.tree.clone(),
                })?;

            for variant in &config.variants {
                if !raw
                    .build_environments
                    .iter()
                    .any(|e| e.name == variant.build_environment)
                {
                    return Err(ConfigError::UnknownEnvironmentReference {
                        config: config.name.clone(),
                        variant: variant.name.clone(),
                        environment: variant.build_environment.clone(),
                    });
                }
                for fragment in &variant.fragments {
                    if !raw.fragments.iter().any(|f| &f.name == fragment) {
                        return Err(ConfigError::UnknownFragmentReference {
                            config: config.name.clone(),
                            variant: variant.name.clone(),
                            fragment: fragment.clone(),
                        });
                    }
                }
            }

            configs.push(BuildConfig {
                name: config.name,
                tree,
                branch: config.branch,
                variants: config.variants,
            });
        }

        Ok(Self {
            trees: raw.trees,
            fragments: raw.fragments,
            environments: raw.build_environments,
            configs,
        })
    }

    /// Iterate build configurations in document order.
    pub fn configs(&self) -> impl Iterator<Item = &BuildConfig> {
        self.configs.iter()
    }

    /// Look up a build configuration by name.
    pub fn config(&self, name: &str) -> Result<&BuildConfig, ConfigError> {
        self.configs
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::ConfigurationNotFound {
                name: name.to_string(),
            })
    }

    /// Look up a source tree by name.
    pub fn tree(&self, name: &str) -> Result<&Tree, ConfigError> {
        self.trees
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ConfigError::TreeNotFound {
                name: name.to_string(),
            })
    }

    /// Look up a build environment by name.
    pub fn environment(&self, name: &str) -> Result<&BuildEnvironment, ConfigError> {
        self.environments
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ConfigError::EnvironmentNotFound {
                name: name.to_string(),
            })
    }

    /// Look up a config fragment by name.
    pub fn fragment(&self, name: &str) -> Result<&ConfigFragment, ConfigError> {
        self.fragments
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| ConfigError::FragmentNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
trees:
  - name: mainline
    url: https://example.org/linux.git
  - name: stable
    url: https://example.org/linux-stable.git

fragments:
  - name: virtio
    path: kernel/configs/virtio.config
    configs:
      - CONFIG_VIRTIO=y
      - CONFIG_VIRTIO_PCI=y

build_environments:
  - name: gcc-12
    cc: gcc
    cc_version: "12"
    arch_map:
      arm64: aarch64-linux-gnu-
      x86_64: x86_64-linux-gnu-

build_configs:
  - name: mainline
    tree: mainline
    branch: master
    variants:
      - name: gcc-12
        architectures: [x86_64, arm64]
        build_environment: gcc-12
        fragments: [virtio]
  - name: stable-6.6
    tree: stable
    branch: linux-6.6.y
    variants:
      - name: gcc-12
        architectures: [x86_64]
        build_environment: gcc-12
"#;

    #[test]
    fn test_configs_keep_document_order() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let names: Vec<&str> = doc.configs().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["mainline", "stable-6.6"]);
    }

    #[test]
    fn test_config_lookup_roundtrip() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let config = doc.config("stable-6.6").unwrap();
        assert_eq!(config.name, "stable-6.6");
        assert_eq!(config.tree.name, "stable");
        assert_eq!(config.branch, "linux-6.6.y");
    }

    #[test]
    fn test_unknown_config_is_typed_error() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let err = doc.config("nope").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConfigurationNotFound { ref name } if name == "nope"
        ));
    }

    #[test]
    fn test_variant_lookup_and_order() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let config = doc.config("mainline").unwrap();
        let variant = config.variant("gcc-12").unwrap();
        assert_eq!(variant.architectures, ["x86_64", "arm64"]);

        let err = config.variant("clang-17").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VariantNotFound { ref config, ref variant }
                if config == "mainline" && variant == "clang-17"
        ));
    }

    #[test]
    fn test_tree_is_embedded_on_load() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let config = doc.config("mainline").unwrap();
        assert_eq!(config.tree.url.as_str(), "https://example.org/linux.git");
    }

    #[test]
    fn test_dangling_tree_reference_rejected_at_load() {
        let content = DOC.replace("tree: stable", "tree: linux-next");
        let err = BuildConfigs::from_yaml(&content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownTreeReference { ref config, ref tree }
                if config == "stable-6.6" && tree == "linux-next"
        ));
    }

    #[test]
    fn test_dangling_environment_reference_rejected_at_load() {
        let content = DOC.replace("build_environment: gcc-12\n        fragments: [virtio]", "build_environment: clang-17\n        fragments: [virtio]");
        let err = BuildConfigs::from_yaml(&content).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironmentReference { .. }));
    }

    #[test]
    fn test_dangling_fragment_reference_rejected_at_load() {
        let content = DOC.replace("fragments: [virtio]", "fragments: [kselftest]");
        let err = BuildConfigs::from_yaml(&content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownFragmentReference { ref fragment, .. } if fragment == "kselftest"
        ));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = BuildConfigs::from_yaml("build_configs: 7").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_environment_lookup() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let env = doc.environment("gcc-12").unwrap();
        assert_eq!(env.cc, "gcc");
        assert_eq!(env.toolchain("arm64").unwrap(), "aarch64-linux-gnu-");
        assert!(doc.environment("clang-17").is_err());
    }

    #[test]
    fn test_fragment_lookup() {
        let doc = BuildConfigs::from_yaml(DOC).unwrap();
        let fragment = doc.fragment("virtio").unwrap();
        assert_eq!(fragment.path, "kernel/configs/virtio.config");
        assert_eq!(fragment.configs.len(), 2);
    }
}
