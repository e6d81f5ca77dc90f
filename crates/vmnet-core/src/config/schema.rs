//! Schema of `vmnet.toml`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::lima::NetworkTemplate;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VmnetConfig {
    /// Tool home directory. Defaults to `~/.finch`.
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub lima: LimaSection,

    #[serde(default)]
    pub network: NetworkSection,

    #[serde(default)]
    pub binaries: BinariesSection,

    #[serde(default)]
    pub sudoers: SudoersSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimaSection {
    /// Shared Lima default config file.
    #[serde(default)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSection {
    /// Alternate canonical block to append instead of the built-in one.
    #[serde(default)]
    pub block: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinariesSection {
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    #[serde(default)]
    pub install_dir: Option<PathBuf>,

    #[serde(default)]
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SudoersSection {
    /// Installed policy file.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// File holding the rendered rules.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl VmnetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(names) = &self.binaries.names {
            if names.is_empty() {
                anyhow::bail!("binaries.names must list at least one binary");
            }
            if let Some(bad) = names
                .iter()
                .find(|n| n.is_empty() || n.contains('/') || n.contains('\\'))
            {
                anyhow::bail!("Invalid binary name '{}': must be a plain file name", bad);
            }
        }
        self.network_template()?;
        Ok(())
    }

    /// The network template to install, honouring an override block.
    pub fn network_template(&self) -> anyhow::Result<NetworkTemplate> {
        match &self.network.block {
            Some(block) => NetworkTemplate::from_block(block.clone())
                .map_err(|e| anyhow::anyhow!("Invalid network.block: {e}")),
            None => Ok(NetworkTemplate::finch_shared()),
        }
    }
}
