use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use vmnet_core::config::{ConfigStore, VmnetConfig};

#[test]
fn load_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new(temp.path().join("vmnet.toml"));

    let config = store.load().unwrap();

    assert_eq!(config, VmnetConfig::default());
}

#[test]
fn load_reads_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vmnet.toml");
    fs::write(
        &path,
        "root = \"/srv/finch\"\n\n[sudoers]\npath = \"/etc/sudoers.d/custom\"\n",
    )
    .unwrap();

    let config = ConfigStore::new(&path).load().unwrap();

    assert_eq!(config.root, Some(PathBuf::from("/srv/finch")));
    assert_eq!(
        config.sudoers.path,
        Some(PathBuf::from("/etc/sudoers.d/custom"))
    );
}

#[test]
fn load_reports_file_path_on_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vmnet.toml");
    fs::write(&path, "root = [unclosed\n").unwrap();

    let err = ConfigStore::new(&path).load().unwrap_err();

    assert!(format!("{err:#}").contains("Failed to parse config file"));
}
