//! Network section of the shared Lima configuration file.
//!
//! The file is shared with other contributors. This capability only ever
//! reads it or appends the canonical block; it never rewrites, reorders or
//! removes existing content.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Capability, PrerequisiteGate};
use crate::error::DependencyError;
use crate::lima::{NetworkTemplate, parse_document};

const DEPENDENCY_NAME: &str = "network configuration";

/// Observable state of the network section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// File missing, empty, or without an entry carrying the template identity.
    Absent,
    /// Exactly one entry carries the identity and it equals the template.
    Installed,
    /// Unparseable, duplicated identity, or identity with the wrong structure.
    Invalid,
}

/// Installs the canonical network block into the shared Lima config.
#[derive(Debug, Clone)]
pub struct NetworkConfigCapability {
    config_path: PathBuf,
    template: NetworkTemplate,
    gate: PrerequisiteGate,
}

impl NetworkConfigCapability {
    /// Create the capability.
    ///
    /// `binaries` is consulted before `sudoers`; when the binaries are
    /// missing the sudoers capability is not queried at all.
    pub fn new(
        config_path: impl Into<PathBuf>,
        template: NetworkTemplate,
        binaries: Arc<dyn Capability>,
        sudoers: Arc<dyn Capability>,
    ) -> Self {
        let gate = PrerequisiteGate::new()
            .with("binaries", binaries)
            .with("sudoers", sudoers);
        Self::with_gate(config_path, template, gate)
    }

    /// Create the capability with an arbitrary prerequisite gate.
    pub fn with_gate(
        config_path: impl Into<PathBuf>,
        template: NetworkTemplate,
        gate: PrerequisiteGate,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            template,
            gate,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn template(&self) -> &NetworkTemplate {
        &self.template
    }

    /// Classify the network section of the file at `path`.
    ///
    /// Never fails: every problem is logged and folded into the result.
    pub fn section_state(&self, path: &Path) -> SectionState {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found: {err}");
                return SectionState::Absent;
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "failed to read config file: {err}");
                return SectionState::Invalid;
            }
        };

        let doc = match parse_document(&bytes) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::error!(
                    path = %path.display(),
                    "failed to parse YAML from config file: {err}"
                );
                return SectionState::Invalid;
            }
        };

        let identity = self.template.identity();
        let matching: Vec<_> = doc.matching(identity).collect();
        let [entry] = matching.as_slice() else {
            let count = matching.len();
            tracing::error!(
                path = %path.display(),
                network = identity,
                count,
                "config file has incorrect number of networks defined"
            );
            return if count == 0 {
                SectionState::Absent
            } else {
                SectionState::Invalid
            };
        };

        if self.template.matches(entry) {
            SectionState::Installed
        } else {
            tracing::debug!(
                path = %path.display(),
                network = identity,
                "network entry does not match the expected structure"
            );
            SectionState::Invalid
        }
    }

    /// Whether the file at `path` holds exactly one, exactly canonical,
    /// network section.
    pub fn verify_config_has_network_section(&self, path: &Path) -> bool {
        self.section_state(path) == SectionState::Installed
    }

    /// Append the canonical block to the file at `path`, creating it if
    /// needed.
    ///
    /// Does not check for an existing section. A newline is written first
    /// when the file does not already end with one, so the block always
    /// starts at column zero. A top-level `networks` key already holding
    /// other entries is not merged into; the file then reads as Invalid.
    pub fn append_network_configuration(&self, path: &Path) -> Result<(), DependencyError> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let mut block = String::new();
        if needs_leading_newline(&mut file)? {
            block.push('\n');
        }
        block.push_str(self.template.block());

        file.write_all(block.as_bytes())?;
        file.flush()?;
        tracing::info!(path = %path.display(), "appended network configuration");
        Ok(())
    }

    /// True iff the binaries and then the sudoers file are installed.
    pub fn should_add_networks_config(&self) -> bool {
        self.gate.satisfied()
    }
}

impl Capability for NetworkConfigCapability {
    fn installed(&self) -> bool {
        self.verify_config_has_network_section(&self.config_path)
    }

    fn install(&self) -> Result<(), DependencyError> {
        if !self.should_add_networks_config() {
            return Err(DependencyError::PrerequisitesMissing {
                dependency: DEPENDENCY_NAME.to_string(),
            });
        }
        self.append_network_configuration(&self.config_path)
    }

    fn requires_root(&self) -> bool {
        false
    }
}

fn needs_leading_newline(file: &mut fs::File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
