//! # BuildOps — The Delegation Contract
//!
//! Every `kforge` command that does more than read the configuration
//! model delegates to this trait. [`KernelOps`] is the production
//! implementation; command-contract tests substitute recording doubles.

use std::path::{Path, PathBuf};

use url::Url;

use kforge_config::{BuildConfig, BuildConfigs};

use crate::client::{ApiClient, StorageClient};
use crate::error::OpsError;
use crate::fragments;
use crate::git;
use crate::tarball;

/// Outcome of comparing the remote branch head with the last built commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitUpdate {
    /// No commit has ever been recorded for this tree/branch; a build is due.
    NeverBuilt,
    /// The recorded commit matches the remote head; nothing to do.
    UpToDate,
    /// The remote head moved; carries the new commit hash.
    New(String),
}

/// One enumerated build target: architecture, make target, environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelTarget {
    /// Target architecture name.
    pub arch: String,
    /// Make target, e.g. `defconfig` or `defconfig+kernel/configs/virtio.config`.
    pub target: String,
    /// Build environment name.
    pub build_environment: String,
}

impl std::fmt::Display for KernelTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.arch, self.target, self.build_environment)
    }
}

/// The operations commands delegate to.
///
/// Object-safe: handlers hold `&dyn BuildOps` so tests can substitute
/// doubles that record invocations.
pub trait BuildOps {
    /// Compare the remote branch head against the last commit recorded
    /// on the storage server.
    fn check_new_commit(
        &self,
        config: &BuildConfig,
        storage: &Url,
    ) -> Result<CommitUpdate, OpsError>;

    /// Record `commit` as the last built commit via the build API.
    fn update_last_commit(
        &self,
        config: &BuildConfig,
        api: &Url,
        token: &str,
        commit: &str,
    ) -> Result<(), OpsError>;

    /// Create or refresh a bare mirror of the configuration's tree.
    fn update_mirror(&self, config: &BuildConfig, mirror: &Path) -> Result<(), OpsError>;

    /// Synchronize a working checkout to the configuration's branch head,
    /// optionally seeding the clone from a mirror.
    fn update_repo(
        &self,
        config: &BuildConfig,
        kdir: &Path,
        mirror: Option<&Path>,
    ) -> Result<(), OpsError>;

    /// The commit hash the checkout's HEAD points at.
    fn head_commit(&self, config: &BuildConfig, kdir: &Path) -> Result<String, OpsError>;

    /// Short description of the checkout's HEAD.
    fn describe(&self, config: &BuildConfig, kdir: &Path) -> Result<String, OpsError>;

    /// Verbose description of the checkout's HEAD, `None` when no
    /// release tag describes it.
    fn describe_verbose(
        &self,
        config: &BuildConfig,
        kdir: &Path,
    ) -> Result<Option<String>, OpsError>;

    /// Write the config fragments referenced by the configuration's
    /// variants into the checkout. Returns the written paths.
    fn generate_fragments(
        &self,
        doc: &BuildConfigs,
        config: &BuildConfig,
        kdir: &Path,
    ) -> Result<Vec<PathBuf>, OpsError>;

    /// Package the checkout into a source tarball, upload it, and return
    /// its public storage URL. `None` means the upload was refused
    /// without a transport error.
    fn push_tarball(
        &self,
        config: &BuildConfig,
        kdir: &Path,
        storage: &Url,
        api: &Url,
        token: &str,
    ) -> Result<Option<Url>, OpsError>;

    /// Enumerate per-target build specs for the configuration's variant ×
    /// architecture matrix, optionally filtered by variant and
    /// architecture name.
    fn list_kernel_configs(
        &self,
        doc: &BuildConfigs,
        config: &BuildConfig,
        kdir: &Path,
        variant: Option<&str>,
        arch: Option<&str>,
    ) -> Result<Vec<KernelTarget>, OpsError>;
}

/// Production implementation: git subprocesses plus the storage/API
/// HTTP clients.
#[derive(Debug, Default)]
pub struct KernelOps;

impl KernelOps {
    /// Create the production operations layer.
    pub fn new() -> Self {
        Self
    }
}

impl BuildOps for KernelOps {
    fn check_new_commit(
        &self,
        config: &BuildConfig,
        storage: &Url,
    ) -> Result<CommitUpdate, OpsError> {
        let remote = git::remote_head(&config.tree.url, &config.branch)?.ok_or_else(|| {
            OpsError::RemoteBranchMissing {
                tree: config.tree.name.clone(),
                branch: config.branch.clone(),
            }
        })?;

        let client = StorageClient::new(storage.clone())?;
        match client.last_commit(&config.tree.name, &config.branch)? {
            None => Ok(CommitUpdate::NeverBuilt),
            Some(last) if last == remote => Ok(CommitUpdate::UpToDate),
            Some(last) => {
                tracing::info!(%last, new = %remote, "remote head moved");
                Ok(CommitUpdate::New(remote))
            }
        }
    }

    fn update_last_commit(
        &self,
        config: &BuildConfig,
        api: &Url,
        token: &str,
        commit: &str,
    ) -> Result<(), OpsError> {
        let client = ApiClient::new(api.clone(), token)?;
        client.update_last_commit(&config.tree.name, &config.branch, commit)
    }

    fn update_mirror(&self, config: &BuildConfig, mirror: &Path) -> Result<(), OpsError> {
        git::update_mirror(&config.tree.url, mirror)
    }

    fn update_repo(
        &self,
        config: &BuildConfig,
        kdir: &Path,
        mirror: Option<&Path>,
    ) -> Result<(), OpsError> {
        git::update_repo(&config.tree.url, &config.branch, kdir, mirror)
    }

    fn head_commit(&self, _config: &BuildConfig, kdir: &Path) -> Result<String, OpsError> {
        git::head_commit(kdir)
    }

    fn describe(&self, _config: &BuildConfig, kdir: &Path) -> Result<String, OpsError> {
        git::describe(kdir)
    }

    fn describe_verbose(
        &self,
        _config: &BuildConfig,
        kdir: &Path,
    ) -> Result<Option<String>, OpsError> {
        git::describe_verbose(kdir)
    }

    fn generate_fragments(
        &self,
        doc: &BuildConfigs,
        config: &BuildConfig,
        kdir: &Path,
    ) -> Result<Vec<PathBuf>, OpsError> {
        fragments::generate_fragments(doc, config, kdir)
    }

    fn push_tarball(
        &self,
        config: &BuildConfig,
        kdir: &Path,
        storage: &Url,
        api: &Url,
        token: &str,
    ) -> Result<Option<Url>, OpsError> {
        let commit = git::head_commit(kdir)?;
        let output = kdir.join(tarball::TARBALL_NAME);
        tarball::make_tarball(kdir, &output)?;

        let digest = tarball::sha256_file(&output)?;
        let bytes = std::fs::read(&output)?;
        tracing::info!(
            commit = %commit,
            size = bytes.len(),
            %digest,
            "uploading source tarball"
        );

        let dest = format!(
            "{}/{}/{}/{}",
            config.tree.name,
            config.branch,
            commit,
            tarball::TARBALL_NAME
        );
        ApiClient::new(api.clone(), token)?.upload(&dest, bytes, &digest)?;

        let url = StorageClient::new(storage.clone())?.file_url(
            &config.tree.name,
            &config.branch,
            &commit,
            tarball::TARBALL_NAME,
        )?;
        Ok(Some(url))
    }

    fn list_kernel_configs(
        &self,
        doc: &BuildConfigs,
        config: &BuildConfig,
        kdir: &Path,
        variant: Option<&str>,
        arch: Option<&str>,
    ) -> Result<Vec<KernelTarget>, OpsError> {
        let variants: Vec<_> = match variant {
            // An explicit variant filter must name a real variant.
            Some(name) => vec![config.variant(name)?],
            None => config.variants.iter().collect(),
        };

        let mut targets = Vec::new();
        for variant in variants {
            // Environment references were validated at load time.
            let _ = doc.environment(&variant.build_environment)?;

            for target_arch in &variant.architectures {
                if arch.is_some_and(|a| a != target_arch.as_str()) {
                    continue;
                }

                targets.push(KernelTarget {
                    arch: target_arch.clone(),
                    target: "defconfig".to_string(),
                    build_environment: variant.build_environment.clone(),
                });

                for name in &variant.fragments {
                    let fragment = doc.fragment(name)?;
                    // Fragment targets only exist once the fragment file
                    // has been generated into the checkout.
                    if kdir.join(&fragment.path).exists() {
                        targets.push(KernelTarget {
                            arch: target_arch.clone(),
                            target: format!("defconfig+{}", fragment.path),
                            build_environment: variant.build_environment.clone(),
                        });
                    }
                }
            }
        }

        Ok(targets)
    }
}
