//! Ordered prerequisite checks for dependencies that build on others.

use std::fmt;
use std::sync::Arc;

use super::Capability;

/// Named prerequisites queried in insertion order.
///
/// Put the cheapest, most fundamental prerequisite first: evaluation stops at
/// the first one that is not installed.
#[derive(Clone, Default)]
pub struct PrerequisiteGate {
    prerequisites: Vec<(String, Arc<dyn Capability>)>,
}

impl fmt::Debug for PrerequisiteGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrerequisiteGate")
            .field("prerequisites", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl PrerequisiteGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prerequisite after the existing ones.
    pub fn with(mut self, name: impl Into<String>, capability: Arc<dyn Capability>) -> Self {
        self.prerequisites.push((name.into(), capability));
        self
    }

    /// Prerequisite names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prerequisites.iter().map(|(name, _)| name.as_str())
    }

    /// True when every prerequisite reports installed. An empty gate is open.
    pub fn satisfied(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Name of the first prerequisite that is not installed.
    pub fn first_missing(&self) -> Option<&str> {
        for (name, capability) in &self.prerequisites {
            if !capability.installed() {
                tracing::debug!(prerequisite = %name, "prerequisite is not installed");
                return Some(name.as_str());
            }
        }
        None
    }
}
