//! Content digests for comparing installed files against their sources.

use std::fs;
use std::io;
use std::path::Path;

/// Compute the blake3 digest of a file as a hex string.
///
/// Reads the file in chunks so large binaries are not loaded at once.
pub fn digest_file(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().to_hex().to_string())
}

/// Whether two files have identical content.
pub fn files_match(a: &Path, b: &Path) -> io::Result<bool> {
    let a_len = fs::metadata(a)?.len();
    let b_len = fs::metadata(b)?.len();
    if a_len != b_len {
        return Ok(false);
    }
    Ok(digest_file(a)? == digest_file(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_digest_is_hex() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let file = tmp.path().join("bin");
        fs::write(&file, b"hello world").expect("write should succeed");

        let digest = digest_file(&file).expect("digest should succeed");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, blake3::hash(b"hello world").to_hex().to_string());
    }

    #[test]
    fn test_files_match_same_content() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, b"socket_vmnet").expect("write should succeed");
        fs::write(&b, b"socket_vmnet").expect("write should succeed");

        assert!(files_match(&a, &b).expect("compare should succeed"));
    }

    #[test]
    fn test_files_match_detects_change() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, b"version 1").expect("write should succeed");
        fs::write(&b, b"version 2").expect("write should succeed");

        assert!(!files_match(&a, &b).expect("compare should succeed"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let result = digest_file(&tmp.path().join("missing"));
        assert_eq!(
            result.expect_err("digest of missing file should fail").kind(),
            io::ErrorKind::NotFound
        );
    }
}
