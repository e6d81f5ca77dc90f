//! Status collection for managed dependencies.

use serde::{Deserialize, Serialize};

use crate::dependency::Group;

/// Overall status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub groups: Vec<GroupStatus>,
    pub summary: StatusSummary,
}

/// Summary counts for quick overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStatus {
    pub name: String,
    pub description: String,
    pub dependencies: Vec<DependencyStatus>,
}

impl GroupStatus {
    pub fn installed(&self) -> bool {
        self.dependencies.iter().all(|d| d.installed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub name: String,
    pub installed: bool,
    pub requires_root: bool,
}

impl SystemStatus {
    pub fn is_ok(&self) -> bool {
        self.summary.missing == 0
    }
}

/// Query every dependency of every group once.
pub fn collect_status(groups: &[Group]) -> SystemStatus {
    let groups: Vec<GroupStatus> = groups
        .iter()
        .map(|group| GroupStatus {
            name: group.name().to_string(),
            description: group.description().to_string(),
            dependencies: group
                .dependencies()
                .iter()
                .map(|(name, dep)| DependencyStatus {
                    name: name.clone(),
                    installed: dep.installed(),
                    requires_root: dep.requires_root(),
                })
                .collect(),
        })
        .collect();

    let total = groups.iter().map(|g| g.dependencies.len()).sum();
    let missing = groups
        .iter()
        .flat_map(|g| &g.dependencies)
        .filter(|d| !d.installed)
        .count();

    SystemStatus {
        groups,
        summary: StatusSummary { total, missing },
    }
}
