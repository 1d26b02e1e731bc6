//! Content Hash Value Object
//!
//! SHA-256 digest of an uploaded module. Used to report what was shipped and
//! to name files written by `deploy --outdir`.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Content hash value object, always carrying the `sha256:` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Hash raw module bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        Self(format!("{}{:x}", Self::PREFIX, digest))
    }

    /// Full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First 12 hex characters, enough to tell uploads apart in output
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_computes_sha256() {
        let hash = ContentHash::from_bytes(b"hello");
        assert!(hash.as_str().starts_with("sha256:"));
        assert_eq!(hash.hex().len(), 64);
        assert_eq!(
            hash.hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn different_content_different_hash() {
        assert_ne!(
            ContentHash::from_bytes(b"export default {}"),
            ContentHash::from_bytes(b"addEventListener()")
        );
    }

    #[test]
    fn short_is_prefix_of_hex() {
        let hash = ContentHash::from_bytes(b"module");
        assert_eq!(hash.short().len(), 12);
        assert!(hash.hex().starts_with(hash.short()));
    }

    #[test]
    fn serializes_as_string() {
        let hash = ContentHash::from_bytes(b"hello");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.as_str()));
    }
}
