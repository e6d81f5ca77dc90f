//! Default on-disk layout.

use std::path::{Path, PathBuf};

use super::VmnetConfig;

/// Resolved locations of every file the dependencies touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub root: PathBuf,
    pub lima_config: PathBuf,
    pub binaries_source_dir: PathBuf,
    pub binaries_install_dir: PathBuf,
    pub binary_names: Vec<String>,
    pub sudoers_path: PathBuf,
    pub sudoers_source: PathBuf,
}

pub const DEFAULT_INSTALL_DIR: &str = "/opt/finch/bin";
pub const DEFAULT_SUDOERS_PATH: &str = "/etc/sudoers.d/finch-lima";
pub const DEFAULT_BINARY: &str = "socket_vmnet";

/// Default tool home: `~/.finch`.
pub fn default_root() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".finch"))
}

/// Default location of `vmnet.toml`.
pub fn default_config_file() -> anyhow::Result<PathBuf> {
    let base =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(base.join("vmnet").join("vmnet.toml"))
}

pub fn lima_default_config_path(root: &Path) -> PathBuf {
    root.join("lima")
        .join("data")
        .join("_config")
        .join("default.yaml")
}

pub fn binaries_source_dir(root: &Path) -> PathBuf {
    root.join("dependencies")
        .join("lima-socket_vmnet")
        .join("opt")
        .join("finch")
        .join("bin")
}

pub fn sudoers_source_path(root: &Path) -> PathBuf {
    root.join("lima").join("data").join("_config").join("sudoers")
}

impl ToolPaths {
    /// Default layout under `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            lima_config: lima_default_config_path(&root),
            binaries_source_dir: binaries_source_dir(&root),
            binaries_install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            binary_names: vec![DEFAULT_BINARY.to_string()],
            sudoers_path: PathBuf::from(DEFAULT_SUDOERS_PATH),
            sudoers_source: sudoers_source_path(&root),
            root,
        }
    }

    /// Layout from `config`, with `default_root` used when no root is set.
    pub fn resolve(config: &VmnetConfig, default_root: &Path) -> Self {
        let root = config
            .root
            .clone()
            .unwrap_or_else(|| default_root.to_path_buf());
        let mut paths = Self::from_root(root);

        if let Some(path) = &config.lima.config_path {
            paths.lima_config = path.clone();
        }
        if let Some(dir) = &config.binaries.source_dir {
            paths.binaries_source_dir = dir.clone();
        }
        if let Some(dir) = &config.binaries.install_dir {
            paths.binaries_install_dir = dir.clone();
        }
        if let Some(names) = &config.binaries.names {
            paths.binary_names = names.clone();
        }
        if let Some(path) = &config.sudoers.path {
            paths.sudoers_path = path.clone();
        }
        if let Some(path) = &config.sudoers.source {
            paths.sudoers_source = path.clone();
        }
        paths
    }
}
