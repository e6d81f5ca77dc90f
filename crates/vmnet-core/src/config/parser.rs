//! TOML parser with helpful error messages

use super::schema::VmnetConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse vmnet.toml with detailed error messages
pub fn parse_vmnet_toml(path: &Path) -> Result<VmnetConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_vmnet_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse vmnet.toml content from string
pub fn parse_vmnet_toml_str(content: &str) -> Result<VmnetConfig> {
    let config: VmnetConfig =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    config.validate()?;

    Ok(config)
}

/// Enhance TOML parsing errors with the offending lines
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();

    match error.span() {
        Some(span) => {
            let offset = span.start.min(content.len());
            let line_num = content[..offset].matches('\n').count() + 1;
            let context = get_line_context(content, line_num);
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                context,
                message
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", message),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
root = "/Applications/Finch"

[lima]
config_path = "/Applications/Finch/lima/data/_config/default.yaml"

[binaries]
source_dir = "/Applications/Finch/dependencies/bin"
install_dir = "/opt/finch/bin"
names = ["socket_vmnet", "socket_vmnet_client"]

[sudoers]
path = "/etc/sudoers.d/finch-lima"
source = "/Applications/Finch/lima/data/_config/sudoers"
"#;

        let config = parse_vmnet_toml_str(toml).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/Applications/Finch")));
        assert_eq!(config.binaries.names.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            config.sudoers.path,
            Some(PathBuf::from("/etc/sudoers.d/finch-lima"))
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_vmnet_toml_str("").unwrap();
        assert_eq!(config, VmnetConfig::default());
    }

    #[test]
    fn test_parse_network_block_override() {
        let toml = r#"
[network]
block = """
networks:
  - lima: bridged
"""
"#;
        let config = parse_vmnet_toml_str(toml).unwrap();
        assert_eq!(config.network_template().unwrap().identity(), "bridged");
    }

    #[test]
    fn test_parse_unknown_key_is_error() {
        let result = parse_vmnet_toml_str("[binaries]\nsource = \"/tmp\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_enhanced_error_points_at_line() {
        let toml = "root = \"/tmp\"\n[lima\nconfig_path = \"x\"\n";
        let err = parse_vmnet_toml_str(toml).unwrap_err().to_string();
        assert!(err.contains("TOML parsing error"));
        assert!(err.contains(">>>"));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let result = parse_vmnet_toml_str("[binaries]\nnames = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "root = \"/srv/finch\"").unwrap();

        let config = parse_vmnet_toml(temp_file.path()).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/srv/finch")));
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = parse_vmnet_toml(Path::new("/nonexistent/path/vmnet.toml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
