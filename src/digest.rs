//! SHA-256 digests in registry and Nix encodings.
//!
//! Registries identify blobs as `sha256:<hex>`; Nix expects SRI-style
//! `sha256-<base64>` hashes. [`Sha256Digest`] holds the raw bytes and
//! renders either form.

use base64::Engine;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{Ollama2NixError, Result};

/// Prefix of registry digests.
pub const DIGEST_PREFIX: &str = "sha256:";

/// Prefix of Nix content hashes and on-disk blob names.
pub const CONTENT_HASH_PREFIX: &str = "sha256-";

/// A SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    /// Parse a registry digest.
    ///
    /// The `sha256:` prefix is stripped when present and tolerated when
    /// absent. Any other prefix stays part of the payload and fails hex
    /// decoding.
    pub fn parse(digest: &str) -> Result<Self> {
        let payload = digest.strip_prefix(DIGEST_PREFIX).unwrap_or(digest);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(payload, &mut bytes).map_err(|source| Ollama2NixError::Encoding {
            digest: digest.to_string(),
            source,
        })?;
        Ok(Self(bytes))
    }

    /// Hash `data` directly.
    pub fn of(data: &[u8]) -> Self {
        Self::from_hasher(Sha256::new_with_prefix(data))
    }

    /// Finalize a streaming hasher.
    pub fn from_hasher(hasher: Sha256) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Nix content hash: `sha256-` plus padded standard base64.
    pub fn to_content_hash(&self) -> String {
        format!(
            "{}{}",
            CONTENT_HASH_PREFIX,
            base64::engine::general_purpose::STANDARD.encode(self.0)
        )
    }

    /// File name of the blob in an Ollama model store: `sha256-<hex>`.
    pub fn blob_file_name(&self) -> String {
        format!("{}{}", CONTENT_HASH_PREFIX, self.to_hex())
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DIGEST_PREFIX, self.to_hex())
    }
}

/// Convert a registry digest (`sha256:<hex>`) into a Nix content hash
/// (`sha256-<base64>`).
///
/// # Example
///
/// ```
/// use ollama2nix::digest::to_content_hash;
///
/// let hash = to_content_hash(
///     "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// )
/// .unwrap();
/// assert_eq!(hash, "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
/// ```
pub fn to_content_hash(digest: &str) -> Result<String> {
    Ok(Sha256Digest::parse(digest)?.to_content_hash())
}
