//! Privilege-elevation policy that lets the network helpers start without a
//! password prompt.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Capability;
use crate::error::DependencyError;

/// A sudoers drop-in file that must be byte-identical to its rendered source.
#[derive(Debug, Clone)]
pub struct SudoersCapability {
    path: PathBuf,
    source: PathBuf,
}

impl SudoersCapability {
    /// `path` is the installed policy file, `source` holds the rendered rules.
    pub fn new(path: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_source(&self) -> Result<Vec<u8>, DependencyError> {
        match fs::read(&self.source) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(DependencyError::SourceMissing {
                    path: self.source.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Capability for SudoersCapability {
    fn installed(&self) -> bool {
        let installed = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), "sudoers file not readable: {err}");
                return false;
            }
        };
        match self.read_source() {
            Ok(expected) => installed == expected,
            Err(err) => {
                tracing::error!("failed to read sudoers source: {err}");
                false
            }
        }
    }

    fn install(&self) -> Result<(), DependencyError> {
        let content = self.read_source()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        set_policy_mode(&self.path)?;
        tracing::debug!(path = %self.path.display(), "installed sudoers file");
        Ok(())
    }

    fn requires_root(&self) -> bool {
        true
    }
}

#[cfg(unix)]
fn set_policy_mode(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_policy_mode(_path: &Path) -> io::Result<()> {
    Ok(())
}
