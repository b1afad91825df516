// src/hash.rs

//! Content hashing for setting files
//!
//! The setting writer decides whether a file needs rewriting by comparing
//! the SHA-256 of the rendered content against the SHA-256 of what is on
//! disk. Files are streamed so large `sources.list.d` entries are not read
//! into memory twice.

use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// A SHA-256 digest as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Get the hash value as a hex string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format as a prefixed string (e.g., "sha256:abc123...")
    pub fn to_prefixed_string(&self) -> String {
        format!("sha256:{}", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the hash of a byte slice
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    ContentHash(format!("{:x}", hasher.finalize()))
}

/// Compute the hash of data from a reader
pub fn hash_reader<R: Read>(reader: &mut R) -> io::Result<ContentHash> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

/// Compute the hash of an existing file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn hash_file(path: &Path) -> io::Result<Option<ContentHash>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    hash_reader(&mut file).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes_known_value() {
        let hash = hash_bytes(b"Hello, World!");
        assert_eq!(
            hash.as_str(),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_reader_matches_bytes() {
        let data = b"Package: *\nPin: release a=stable\nPin-Priority: 700\n";
        let mut cursor = io::Cursor::new(&data[..]);
        assert_eq!(hash_reader(&mut cursor).unwrap(), hash_bytes(data));
    }

    #[test]
    fn test_hash_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(hash_file(&dir.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn test_hash_file_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("50-nginx.pref");
        std::fs::write(&path, "content").unwrap();
        assert_eq!(hash_file(&path).unwrap(), Some(hash_bytes(b"content")));
    }

    #[test]
    fn test_prefixed_string() {
        let hash = hash_bytes(b"");
        assert!(hash.to_prefixed_string().starts_with("sha256:e3b0c442"));
    }
}
