//! Content Fingerprint Value Object
//!
//! A SHA-256 digest of a file's full content. Two reads produce the same
//! fingerprint exactly when the bytes are identical.

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PreviewError, PreviewResult};

/// Content fingerprint value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Prefix used when displaying fingerprints
    pub const PREFIX: &'static str = "sha256:";

    /// Compute the fingerprint of in-memory content
    pub fn of_bytes(content: &[u8]) -> Self {
        Self(Sha256::digest(content).into())
    }

    /// Read the whole file and fingerprint it
    pub fn of_file(path: &Path) -> PreviewResult<Self> {
        let content = std::fs::read(path).map_err(|source| PreviewError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::of_bytes(&content))
    }

    /// Hex digest without prefix
    pub fn hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.hex())
    }
}
