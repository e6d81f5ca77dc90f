//! Config store for loading vmnet.toml.

use std::path::{Path, PathBuf};

use super::{VmnetConfig, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Store at the default location under the user config directory.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(paths::default_config_file()?))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config; a missing file yields defaults.
    pub fn load(&self) -> anyhow::Result<VmnetConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(VmnetConfig::new());
        }
        parser::parse_vmnet_toml(&self.config_path)
    }
}
