//! Wiring of configuration into concrete dependencies.

use std::sync::Arc;

use crate::config::{ConfigStore, ToolPaths, VmnetConfig, paths};
use crate::dependency::{
    BinariesCapability, Capability, Group, NetworkConfigCapability, SudoersCapability,
};
use crate::lima::NetworkTemplate;

pub const VMNET_GROUP: &str = "vmnet";
const VMNET_DESCRIPTION: &str = "shared VM networking (socket_vmnet)";

/// Resolved dependencies for one run of the tool.
///
/// Frontends build this once and hand its groups to the install or status
/// commands.
#[derive(Debug, Clone)]
pub struct DependencyContext {
    paths: ToolPaths,
    template: NetworkTemplate,
}

impl DependencyContext {
    pub fn new(paths: ToolPaths, template: NetworkTemplate) -> Self {
        Self { paths, template }
    }

    /// Build from a loaded config, defaulting the root to `~/.finch`.
    pub fn from_config(config: &VmnetConfig) -> anyhow::Result<Self> {
        let default_root = match &config.root {
            Some(root) => root.clone(),
            None => paths::default_root()?,
        };
        Ok(Self::new(
            ToolPaths::resolve(config, &default_root),
            config.network_template()?,
        ))
    }

    /// Load config from `store` and build the context.
    pub fn load(store: &ConfigStore) -> anyhow::Result<Self> {
        let config = store.load()?;
        Self::from_config(&config)
    }

    pub fn paths(&self) -> &ToolPaths {
        &self.paths
    }

    pub fn template(&self) -> &NetworkTemplate {
        &self.template
    }

    /// The networking group: binaries, then sudoers, then the network section.
    pub fn vmnet_group(&self) -> Group {
        let binaries: Arc<dyn Capability> = Arc::new(BinariesCapability::new(
            &self.paths.binaries_source_dir,
            &self.paths.binaries_install_dir,
            self.paths.binary_names.clone(),
        ));
        let sudoers: Arc<dyn Capability> = Arc::new(SudoersCapability::new(
            &self.paths.sudoers_path,
            &self.paths.sudoers_source,
        ));
        let network = Arc::new(NetworkConfigCapability::new(
            &self.paths.lima_config,
            self.template.clone(),
            binaries.clone(),
            sudoers.clone(),
        ));

        Group::new(VMNET_GROUP, VMNET_DESCRIPTION)
            .with("binaries", binaries)
            .with("sudoers", sudoers)
            .with("network", network)
    }

    /// Every group this tool manages.
    pub fn groups(&self) -> Vec<Group> {
        vec![self.vmnet_group()]
    }
}
