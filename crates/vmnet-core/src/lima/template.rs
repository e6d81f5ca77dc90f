//! The canonical network block this tool owns inside the shared file.

use std::borrow::Cow;

use super::{NetworkEntry, parse_document};
use crate::error::DocumentError;

/// Name of the shared-mode host network the VM attaches to.
pub const FINCH_SHARED_NETWORK: &str = "finch-shared";

/// Block appended to the shared Lima config. Byte-identical on every install.
pub const FINCH_SHARED_BLOCK: &str = "networks:\n  - lima: finch-shared\n";

/// Immutable pairing of the exact text to append and the entry it must
/// parse back to.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkTemplate {
    block: Cow<'static, str>,
    entry: NetworkEntry,
}

impl Default for NetworkTemplate {
    fn default() -> Self {
        Self::finch_shared()
    }
}

impl NetworkTemplate {
    /// Template for the `finch-shared` network.
    pub fn finch_shared() -> Self {
        Self {
            block: Cow::Borrowed(FINCH_SHARED_BLOCK),
            entry: NetworkEntry::lima(FINCH_SHARED_NETWORK),
        }
    }

    /// Build a template from rendered YAML.
    ///
    /// The block must hold exactly one network entry and that entry must
    /// carry an identity.
    pub fn from_block(block: impl Into<Cow<'static, str>>) -> Result<Self, DocumentError> {
        let block = block.into();
        let doc = parse_document(block.as_bytes())?;
        match doc.networks() {
            [entry] if entry.identity().is_some() => Ok(Self {
                entry: entry.clone(),
                block,
            }),
            networks => Err(DocumentError::InvalidTemplate {
                found: networks.iter().filter(|e| e.identity().is_some()).count(),
            }),
        }
    }

    /// Exact text written on install.
    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn entry(&self) -> &NetworkEntry {
        &self.entry
    }

    pub fn identity(&self) -> &str {
        self.entry.identity().unwrap_or_default()
    }

    /// Whether `entry` claims to be this template's network.
    pub fn matches_identity(&self, entry: &NetworkEntry) -> bool {
        entry.identity() == Some(self.identity())
    }

    /// Whether `entry` is structurally identical to the template's entry.
    pub fn matches(&self, entry: &NetworkEntry) -> bool {
        *entry == self.entry
    }
}
