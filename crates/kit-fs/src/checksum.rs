//! SHA-256 checksums in the `sha256:<hex>` form

use sha2::{Digest, Sha256};

use crate::{NormalizedPath, Result, io};

const PREFIX: &str = "sha256:";

/// Checksum of in-memory text.
pub fn content_checksum(content: &str) -> String {
    bytes_checksum(content.as_bytes())
}

/// Checksum of raw bytes.
pub fn bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Checksum of a file's contents.
pub fn file_checksum(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    let bytes = std::fs::read(&native).map_err(|e| crate::Error::io(&native, e))?;
    Ok(bytes_checksum(&bytes))
}

/// Whether `checksum` is in the canonical `sha256:<64 hex>` form.
pub fn is_valid(checksum: &str) -> bool {
    checksum
        .strip_prefix(PREFIX)
        .is_some_and(|hex| hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Compare a file on disk against a previously recorded checksum.
pub fn file_matches(path: &NormalizedPath, expected: &str) -> Result<bool> {
    match io::read_text_if_exists(path)? {
        Some(content) => Ok(content_checksum(&content) == expected),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_checksum_known_value() {
        assert_eq!(
            content_checksum("hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn different_content_different_checksum() {
        assert_ne!(content_checksum("aaa"), content_checksum("bbb"));
    }

    #[test]
    fn validity_check() {
        assert!(is_valid(&content_checksum("x")));
        assert!(!is_valid("sha256:xyz"));
        assert!(!is_valid("md5:abc"));
    }

    #[test]
    fn file_checksum_matches_content_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("package.json"));
        std::fs::write(path.to_native(), "{}\n").unwrap();

        assert_eq!(file_checksum(&path).unwrap(), content_checksum("{}\n"));
        assert!(file_matches(&path, &content_checksum("{}\n")).unwrap());
        assert!(!file_matches(&path, &content_checksum("{}")).unwrap());
    }

    #[test]
    fn missing_file_never_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("absent.json"));
        assert!(!file_matches(&path, &content_checksum("")).unwrap());
    }
}
