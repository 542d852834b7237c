//! Command-contract tests: every sub-command exercised against the
//! loaded model and a recording `BuildOps` double, asserting the tagged
//! outcome, the printed payload, and which delegated operations ran.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use url::Url;

use kforge_build::{BuildOps, CommitUpdate, KernelTarget, OpsError};
use kforge_cli::args::{ApiArg, ConfigArg, KdirArg, StorageArg, TokenArg, VariantArg};
use kforge_cli::artifacts::PushTarballArgs;
use kforge_cli::cli::{dispatch, Cli, Commands};
use kforge_cli::configs::{ArchListArgs, BuildEnvironmentArgs, ListVariantsArgs, TreeBranchArgs};
use kforge_cli::source::{
    CheckNewCommitArgs, DescribeArgs, UpdateLastCommitArgs, UpdateMirrorArgs,
};
use kforge_cli::CommandOutcome;
use kforge_config::{BuildConfig, BuildConfigs, ConfigError};

const DOC: &str = r#"
trees:
  - name: linux
    url: https://example.org/linux.git

fragments:
  - name: virtio
    path: kernel/configs/virtio.config
    configs: [CONFIG_VIRTIO=y]

build_environments:
  - name: gcc-12
    cc: gcc
    cc_version: "12"
    arch_map:
      arm64: aarch64-linux-gnu-
      x86_64: x86_64-linux-gnu-

build_configs:
  - name: mainline
    tree: linux
    branch: main
    variants:
      - name: gcc-12
        architectures: [x86_64, arm64]
        build_environment: gcc-12
        fragments: [virtio]
  - name: stable-6.6
    tree: linux
    branch: linux-6.6.y
    variants:
      - name: gcc-12
        architectures: [x86_64]
        build_environment: gcc-12
  - name: next
    tree: linux
    branch: master
    variants: []
"#;

fn doc() -> BuildConfigs {
    BuildConfigs::from_yaml(DOC).unwrap()
}

/// Recording double: every delegated call is logged; returns are canned.
struct RecordingOps {
    calls: RefCell<Vec<&'static str>>,
    commit_update: CommitUpdate,
    push_result: Option<Url>,
    verbose: Option<String>,
}

impl RecordingOps {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            commit_update: CommitUpdate::UpToDate,
            push_result: None,
            verbose: None,
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }
}

impl BuildOps for RecordingOps {
    fn check_new_commit(
        &self,
        _config: &BuildConfig,
        _storage: &Url,
    ) -> Result<CommitUpdate, OpsError> {
        self.record("check_new_commit");
        Ok(self.commit_update.clone())
    }

    fn update_last_commit(
        &self,
        _config: &BuildConfig,
        _api: &Url,
        _token: &str,
        _commit: &str,
    ) -> Result<(), OpsError> {
        self.record("update_last_commit");
        Ok(())
    }

    fn update_mirror(&self, _config: &BuildConfig, _mirror: &Path) -> Result<(), OpsError> {
        self.record("update_mirror");
        Ok(())
    }

    fn update_repo(
        &self,
        _config: &BuildConfig,
        _kdir: &Path,
        _mirror: Option<&Path>,
    ) -> Result<(), OpsError> {
        self.record("update_repo");
        Ok(())
    }

    fn head_commit(&self, _config: &BuildConfig, _kdir: &Path) -> Result<String, OpsError> {
        self.record("head_commit");
        Ok("1a2b3c4d5e6f".to_string())
    }

    fn describe(&self, _config: &BuildConfig, _kdir: &Path) -> Result<String, OpsError> {
        self.record("describe");
        Ok("v6.10-rc3".to_string())
    }

    fn describe_verbose(
        &self,
        _config: &BuildConfig,
        _kdir: &Path,
    ) -> Result<Option<String>, OpsError> {
        self.record("describe_verbose");
        Ok(self.verbose.clone())
    }

    fn generate_fragments(
        &self,
        _doc: &BuildConfigs,
        _config: &BuildConfig,
        _kdir: &Path,
    ) -> Result<Vec<PathBuf>, OpsError> {
        self.record("generate_fragments");
        Ok(Vec::new())
    }

    fn push_tarball(
        &self,
        _config: &BuildConfig,
        _kdir: &Path,
        _storage: &Url,
        _api: &Url,
        _token: &str,
    ) -> Result<Option<Url>, OpsError> {
        self.record("push_tarball");
        Ok(self.push_result.clone())
    }

    fn list_kernel_configs(
        &self,
        _doc: &BuildConfigs,
        _config: &BuildConfig,
        _kdir: &Path,
        _variant: Option<&str>,
        _arch: Option<&str>,
    ) -> Result<Vec<KernelTarget>, OpsError> {
        self.record("list_kernel_configs");
        Ok(vec![
            KernelTarget {
                arch: "x86_64".to_string(),
                target: "defconfig".to_string(),
                build_environment: "gcc-12".to_string(),
            },
            KernelTarget {
                arch: "arm64".to_string(),
                target: "defconfig+kernel/configs/virtio.config".to_string(),
                build_environment: "gcc-12".to_string(),
            },
        ])
    }
}

fn config_arg(name: &str) -> ConfigArg {
    ConfigArg {
        config: name.to_string(),
    }
}

fn push_args(token: &str) -> PushTarballArgs {
    PushTarballArgs {
        config: config_arg("mainline"),
        kdir: KdirArg {
            kdir: PathBuf::from("/srv/checkout"),
        },
        storage: StorageArg {
            storage: Url::parse("https://storage.example.org").unwrap(),
        },
        api: ApiArg {
            api: Url::parse("https://api.example.org").unwrap(),
        },
        token: TokenArg {
            token: token.to_string(),
        },
    }
}

// ---- dispatch table ----

#[test]
fn test_every_subcommand_has_help() {
    use clap::CommandFactory;

    let command = Cli::command();
    let subcommands: Vec<_> = command
        .get_subcommands()
        .filter(|sub| sub.get_name() != "help")
        .collect();
    assert_eq!(subcommands.len(), 13);

    for sub in subcommands {
        let about = sub.get_about().map(ToString::to_string).unwrap_or_default();
        assert!(
            !about.is_empty(),
            "sub-command '{}' has no help text",
            sub.get_name()
        );
    }
}

#[test]
fn test_dispatch_invokes_exactly_one_operation() {
    let ops = RecordingOps::new();
    let command = Commands::UpdateMirror(UpdateMirrorArgs {
        config: config_arg("mainline"),
        mirror: PathBuf::from("/srv/mirror"),
    });

    let outcome = dispatch(&command, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(ops.calls(), ["update_mirror"]);
}

#[test]
fn test_unknown_config_is_fatal_lookup_error() {
    let ops = RecordingOps::new();
    let command = Commands::TreeBranch(TreeBranchArgs {
        config: config_arg("no-such-config"),
    });

    let err = dispatch(&command, &doc(), &ops).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ConfigurationNotFound { name }) if name == "no-such-config"
    ));
    assert!(ops.calls().is_empty());
}

// ---- matrix queries ----

#[test]
fn test_list_configs_document_order() {
    let ops = RecordingOps::new();
    let outcome = dispatch(&Commands::ListConfigs, &doc(), &ops).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Info("mainline\nstable-6.6\nnext".to_string())
    );
    assert!(ops.calls().is_empty());
}

#[test]
fn test_tree_branch_three_fixed_lines() {
    let args = TreeBranchArgs {
        config: config_arg("mainline"),
    };
    let outcome = kforge_cli::configs::run_tree_branch(&args, &doc()).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Info("linux\nhttps://example.org/linux.git\nmain".to_string())
    );
}

#[test]
fn test_list_variants_declared_order() {
    let args = ListVariantsArgs {
        config: config_arg("mainline"),
    };
    let outcome = kforge_cli::configs::run_list_variants(&args, &doc()).unwrap();
    assert_eq!(outcome, CommandOutcome::Info("gcc-12".to_string()));

    // A configuration with no variants prints nothing and succeeds.
    let args = ListVariantsArgs {
        config: config_arg("next"),
    };
    let outcome = kforge_cli::configs::run_list_variants(&args, &doc()).unwrap();
    assert_eq!(outcome, CommandOutcome::Success);
}

#[test]
fn test_arch_list_declared_order() {
    let args = ArchListArgs {
        config: config_arg("mainline"),
        variant: VariantArg {
            variant: "gcc-12".to_string(),
        },
    };
    let outcome = kforge_cli::configs::run_arch_list(&args, &doc()).unwrap();
    assert_eq!(outcome, CommandOutcome::Info("x86_64\narm64".to_string()));
}

#[test]
fn test_arch_list_unknown_variant_fails_fatally() {
    let args = ArchListArgs {
        config: config_arg("mainline"),
        variant: VariantArg {
            variant: "clang-17".to_string(),
        },
    };
    let err = kforge_cli::configs::run_arch_list(&args, &doc()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::VariantNotFound { config, variant })
            if config == "mainline" && variant == "clang-17"
    ));
}

#[test]
fn test_build_environment_three_lines_without_arch() {
    let args = BuildEnvironmentArgs {
        config: config_arg("mainline"),
        variant: VariantArg {
            variant: "gcc-12".to_string(),
        },
        arch: None,
    };
    let outcome = kforge_cli::configs::run_build_environment(&args, &doc()).unwrap();
    assert_eq!(outcome, CommandOutcome::Info("gcc-12\ngcc\n12".to_string()));
}

#[test]
fn test_build_environment_four_lines_with_arch() {
    let args = BuildEnvironmentArgs {
        config: config_arg("mainline"),
        variant: VariantArg {
            variant: "gcc-12".to_string(),
        },
        arch: Some("arm64".to_string()),
    };
    let outcome = kforge_cli::configs::run_build_environment(&args, &doc()).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Info("gcc-12\ngcc\n12\naarch64-linux-gnu-".to_string())
    );
}

// ---- source synchronization ----

#[test]
fn test_check_new_commit_tri_state() {
    let args = CheckNewCommitArgs {
        config: config_arg("mainline"),
        storage: StorageArg {
            storage: Url::parse("https://storage.example.org").unwrap(),
        },
    };

    let mut ops = RecordingOps::new();
    ops.commit_update = CommitUpdate::NeverBuilt;
    let outcome = kforge_cli::source::run_check_new_commit(&args, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Success);

    let mut ops = RecordingOps::new();
    ops.commit_update = CommitUpdate::UpToDate;
    let outcome = kforge_cli::source::run_check_new_commit(&args, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Failure);

    let mut ops = RecordingOps::new();
    ops.commit_update = CommitUpdate::New("1a2b3c4d".to_string());
    let outcome = kforge_cli::source::run_check_new_commit(&args, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Info("1a2b3c4d".to_string()));
}

#[test]
fn test_update_last_commit_reports_success() {
    let ops = RecordingOps::new();
    let args = UpdateLastCommitArgs {
        config: config_arg("mainline"),
        api: ApiArg {
            api: Url::parse("https://api.example.org").unwrap(),
        },
        token: TokenArg {
            token: "secret".to_string(),
        },
        commit: "1a2b3c4d5e6f".to_string(),
    };

    let outcome = kforge_cli::source::run_update_last_commit(&args, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(ops.calls(), ["update_last_commit"]);
}

#[test]
fn test_describe_verbose_falls_back_to_short() {
    let args = DescribeArgs {
        config: config_arg("mainline"),
        kdir: KdirArg {
            kdir: PathBuf::from("/srv/checkout"),
        },
    };

    let ops = RecordingOps::new();
    let outcome = kforge_cli::source::run_describe(&args, &doc(), &ops).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Info("1a2b3c4d5e6f\nv6.10-rc3\nv6.10-rc3".to_string())
    );

    let mut ops = RecordingOps::new();
    ops.verbose = Some("v6.10-rc3-12-g1a2b3c4d".to_string());
    let outcome = kforge_cli::source::run_describe(&args, &doc(), &ops).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Info("1a2b3c4d5e6f\nv6.10-rc3\nv6.10-rc3-12-g1a2b3c4d".to_string())
    );
}

// ---- build-input preparation ----

#[test]
fn test_push_tarball_invalid_arguments_skip_delegation() {
    let ops = RecordingOps::new();
    let args = push_args("");

    let outcome = kforge_cli::artifacts::run_push_tarball(&args, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Failure);
    assert!(ops.calls().is_empty(), "delegation must not happen");
}

#[test]
fn test_push_tarball_empty_kdir_skips_delegation() {
    let ops = RecordingOps::new();
    let mut args = push_args("secret");
    args.kdir.kdir = PathBuf::new();

    let outcome = kforge_cli::artifacts::run_push_tarball(&args, &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Failure);
    assert!(ops.calls().is_empty());
}

#[test]
fn test_push_tarball_prints_published_url() {
    let mut ops = RecordingOps::new();
    let url = "https://storage.example.org/linux/main/1a2b3c4d/linux-src.tar.gz";
    ops.push_result = Some(Url::parse(url).unwrap());

    let outcome = kforge_cli::artifacts::run_push_tarball(&push_args("secret"), &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Info(url.to_string()));
    assert_eq!(ops.calls(), ["push_tarball"]);
}

#[test]
fn test_push_tarball_refused_upload_fails() {
    let ops = RecordingOps::new();

    let outcome = kforge_cli::artifacts::run_push_tarball(&push_args("secret"), &doc(), &ops).unwrap();
    assert_eq!(outcome, CommandOutcome::Failure);
    assert_eq!(ops.calls(), ["push_tarball"]);
}

#[test]
fn test_list_kernel_configs_whitespace_joined_tuples() {
    let ops = RecordingOps::new();
    let command = Commands::ListKernelConfigs(kforge_cli::artifacts::ListKernelConfigsArgs {
        config: config_arg("mainline"),
        kdir: KdirArg {
            kdir: PathBuf::from("/srv/checkout"),
        },
        variant: None,
        arch: None,
    });

    let outcome = dispatch(&command, &doc(), &ops).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Info(
            "x86_64 defconfig gcc-12\n\
             arm64 defconfig+kernel/configs/virtio.config gcc-12"
                .to_string()
        )
    );
    assert_eq!(ops.calls(), ["list_kernel_configs"]);
}
