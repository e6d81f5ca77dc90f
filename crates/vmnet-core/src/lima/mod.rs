//! Typed view of the shared Lima configuration file.
//!
//! Only the `networks` sequence is modelled. Every other top-level key belongs
//! to other contributors and is ignored on read. This model is used for
//! inspection only: changes to the file are made by appending pre-rendered
//! text, never by re-serializing a parsed document.

pub mod template;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::DocumentError;

pub use template::{FINCH_SHARED_BLOCK, FINCH_SHARED_NETWORK, NetworkTemplate};

/// Root of the shared configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    networks: Vec<NetworkEntry>,
}

/// One entry of the `networks` sequence.
///
/// `lima` names the host network the VM attaches to and acts as the entry's
/// identity. Attributes this model does not know are kept in `extra` so that
/// structural comparison still sees them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    #[serde(default)]
    pub lima: Option<String>,

    #[serde(default)]
    pub socket: Option<String>,

    #[serde(default)]
    pub interface: Option<String>,

    #[serde(default)]
    pub mac_address: Option<String>,

    #[serde(rename = "vzNAT", default)]
    pub vz_nat: Option<bool>,

    #[serde(default)]
    pub metric: Option<u32>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl NetworkEntry {
    /// Create an entry attached to the named Lima network.
    pub fn lima(name: impl Into<String>) -> Self {
        Self {
            lima: Some(name.into()),
            ..Self::default()
        }
    }

    /// Identity of this entry, if it has one.
    pub fn identity(&self) -> Option<&str> {
        self.lima.as_deref()
    }
}

impl ConfigDocument {
    /// All network entries, in file order.
    pub fn networks(&self) -> &[NetworkEntry] {
        &self.networks
    }

    /// Number of network entries.
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Entries whose identity equals `identity`.
    pub fn matching<'a>(&'a self, identity: &'a str) -> impl Iterator<Item = &'a NetworkEntry> {
        self.networks
            .iter()
            .filter(move |entry| entry.identity() == Some(identity))
    }

    /// Number of entries whose identity equals `identity`.
    pub fn count_matching(&self, identity: &str) -> usize {
        self.matching(identity).count()
    }
}

/// Parse raw file contents into a [`ConfigDocument`].
///
/// A blank document (whitespace, comments and document markers only) is an
/// empty document rather than an error.
pub fn parse_document(bytes: &[u8]) -> Result<ConfigDocument, DocumentError> {
    if is_blank_document(bytes) {
        return Ok(ConfigDocument::default());
    }
    Ok(serde_yaml::from_slice(bytes)?)
}

fn is_blank_document(bytes: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return false;
    };
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
