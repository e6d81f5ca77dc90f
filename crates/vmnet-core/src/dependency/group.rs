//! Ordered groups of dependencies installed together.

use std::fmt;
use std::sync::Arc;

use super::Capability;
use crate::error::DependencyError;

/// A named, ordered set of dependencies.
///
/// Order matters: later dependencies may gate on earlier ones, so installing
/// in order lets a single pass satisfy the whole chain.
#[derive(Clone)]
pub struct Group {
    name: String,
    description: String,
    dependencies: Vec<(String, Arc<dyn Capability>)>,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("description", &self.description)
            .field(
                "dependencies",
                &self.dependencies.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Group {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            dependencies: Vec::new(),
        }
    }

    /// Append a dependency after the existing ones.
    pub fn with(mut self, name: impl Into<String>, dependency: Arc<dyn Capability>) -> Self {
        self.dependencies.push((name.into(), dependency));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dependencies(&self) -> &[(String, Arc<dyn Capability>)] {
        &self.dependencies
    }

    pub fn installed(&self) -> bool {
        self.dependencies.iter().all(|(_, dep)| dep.installed())
    }

    /// Whether installing what is still missing needs elevated privileges.
    pub fn requires_root(&self) -> bool {
        self.dependencies
            .iter()
            .any(|(_, dep)| !dep.installed() && dep.requires_root())
    }

    /// Install every dependency that is not yet installed.
    ///
    /// Keeps going after a failure so independent dependencies still get
    /// installed; all failures are returned together.
    pub fn install(&self) -> Result<(), DependencyError> {
        let mut errors = Vec::new();
        for (name, dep) in &self.dependencies {
            if dep.installed() {
                tracing::debug!(group = %self.name, dependency = %name, "already installed");
                continue;
            }
            tracing::info!(group = %self.name, dependency = %name, "installing");
            if let Err(err) = dep.install() {
                tracing::error!(group = %self.name, dependency = %name, "install failed: {err}");
                errors.push(err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DependencyError::Group {
                group: self.name.clone(),
                errors,
            })
        }
    }
}

/// Install every group that is not fully installed.
pub fn install_missing(groups: &[Group]) -> anyhow::Result<()> {
    let mut failures = Vec::new();
    for group in groups {
        if group.installed() {
            tracing::debug!(group = %group.name, "group already installed");
            continue;
        }
        tracing::info!(group = %group.name, "Installing {}", group.description);
        if let Err(err) = group.install() {
            failures.push(err.to_string());
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{}", failures.join("\n"))
    }
}
