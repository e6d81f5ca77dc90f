//! Network helper binaries copied from the tool's bundle into a system path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Capability;
use crate::error::DependencyError;
use crate::fs::files_match;

/// Binaries that must exist in `install_dir` with the same content as in
/// `source_dir`.
#[derive(Debug, Clone)]
pub struct BinariesCapability {
    source_dir: PathBuf,
    install_dir: PathBuf,
    names: Vec<String>,
}

impl BinariesCapability {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        install_dir: impl Into<PathBuf>,
        names: Vec<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            install_dir: install_dir.into(),
            names,
        }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn binary_installed(&self, name: &str) -> bool {
        let source = self.source_dir.join(name);
        let target = self.install_dir.join(name);

        if !target.is_file() {
            tracing::debug!(binary = name, path = %target.display(), "binary not installed");
            return false;
        }
        match files_match(&source, &target) {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!(binary = name, "installed binary differs from bundled copy");
                false
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::error!(
                    binary = name,
                    path = %source.display(),
                    "bundled binary not found"
                );
                false
            }
            Err(err) => {
                tracing::error!(binary = name, "failed to compare binaries: {err}");
                false
            }
        }
    }

    fn install_binary(&self, name: &str) -> Result<(), DependencyError> {
        let source = self.source_dir.join(name);
        if !source.is_file() {
            return Err(DependencyError::SourceMissing { path: source });
        }
        let target = self.install_dir.join(name);
        fs::copy(&source, &target)?;
        set_executable(&target)?;
        tracing::debug!(binary = name, path = %target.display(), "installed binary");
        Ok(())
    }
}

impl Capability for BinariesCapability {
    fn installed(&self) -> bool {
        self.names.iter().all(|name| self.binary_installed(name))
    }

    fn install(&self) -> Result<(), DependencyError> {
        fs::create_dir_all(&self.install_dir)?;
        for name in &self.names {
            self.install_binary(name)?;
        }
        Ok(())
    }

    fn requires_root(&self) -> bool {
        true
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(tmp: &TempDir) -> BinariesCapability {
        let source = tmp.path().join("bundle");
        fs::create_dir_all(&source).expect("create_dir_all should succeed");
        fs::write(source.join("socket_vmnet"), b"vmnet helper").expect("write should succeed");
        BinariesCapability::new(
            source,
            tmp.path().join("opt/bin"),
            vec!["socket_vmnet".to_string()],
        )
    }

    #[test]
    fn test_not_installed_before_install() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        assert!(!setup(&tmp).installed());
    }

    #[test]
    fn test_install_then_installed() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let binaries = setup(&tmp);

        binaries.install().expect("install should succeed");

        assert!(binaries.installed());
        let copied = fs::read(tmp.path().join("opt/bin/socket_vmnet")).expect("read should succeed");
        assert_eq!(copied, b"vmnet helper");
    }

    #[cfg(unix)]
    #[test]
    fn test_install_marks_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tempdir should succeed");
        let binaries = setup(&tmp);
        binaries.install().expect("install should succeed");

        let mode = fs::metadata(tmp.path().join("opt/bin/socket_vmnet"))
            .expect("metadata should succeed")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_changed_binary_is_not_installed() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let binaries = setup(&tmp);
        binaries.install().expect("install should succeed");

        fs::write(tmp.path().join("opt/bin/socket_vmnet"), b"tampered")
            .expect("write should succeed");

        assert!(!binaries.installed());
    }

    #[test]
    fn test_missing_source_fails_install() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let binaries = BinariesCapability::new(
            tmp.path().join("empty"),
            tmp.path().join("opt/bin"),
            vec!["socket_vmnet".to_string()],
        );

        let err = binaries.install().expect_err("install should fail");
        assert!(matches!(err, DependencyError::SourceMissing { .. }));
        assert!(!binaries.installed());
    }

    #[test]
    fn test_requires_root() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        assert!(setup(&tmp).requires_root());
    }
}
