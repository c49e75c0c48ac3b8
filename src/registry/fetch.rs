//! Manifest download.
//!
//! The response body is streamed through a [`HashingReader`] while it is
//! JSON-decoded, so the resulting digest covers exactly the bytes the
//! registry served. Nix later verifies the manifest file against it.

use reqwest::blocking::Client;
use reqwest::Url;
use sha2::{Digest, Sha256};
use std::io::{self, BufReader, Read};

use crate::digest::Sha256Digest;
use crate::error::{Ollama2NixError, Result};
use crate::manifest::Manifest;

/// Reader adapter that feeds every byte it yields into a SHA-256 hasher.
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
    bytes_read: u64,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes_read: 0,
        }
    }

    /// Number of bytes passed through so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Digest of everything read so far.
    pub fn finalize(self) -> Sha256Digest {
        Sha256Digest::from_hasher(self.hasher)
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes_read += n as u64;
        Ok(n)
    }
}

/// A decoded manifest together with the hash of its raw bytes.
#[derive(Debug, Clone)]
pub struct FetchedManifest {
    /// URL the manifest was requested from.
    pub url: Url,
    pub manifest: Manifest,
    /// SHA-256 of the response body.
    pub digest: Sha256Digest,
    /// Length of the response body in bytes.
    pub size: u64,
}

/// Fetches manifests over HTTP(S).
///
/// One attempt per call; no retries and no authentication.
pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    /// Create a fetcher with the transport's default settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ollama2nix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::Error::new(e).context("failed to build HTTP client"))?;
        Ok(Self { client })
    }

    /// Download and decode the manifest at `url`.
    pub fn fetch(&self, url: &Url) -> Result<FetchedManifest> {
        tracing::debug!(url = %url, "Downloading manifest");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| Ollama2NixError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Manifest response received");
        if !status.is_success() {
            return Err(Ollama2NixError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let (manifest, body) =
            decode_hashed(response).map_err(|source| Ollama2NixError::Decode {
                url: url.to_string(),
                source,
            })?;

        let size = body.bytes_read();
        let digest = body.finalize();
        tracing::debug!(
            layers = manifest.layers.len(),
            size,
            digest = %digest,
            "Manifest decoded"
        );

        Ok(FetchedManifest {
            url: url.clone(),
            manifest,
            digest,
            size,
        })
    }
}

/// Decode a manifest from `reader`, hashing every byte up to EOF.
///
/// `reader` is consumed; it is dropped on the error path as well.
pub fn decode_hashed<R: Read>(
    reader: R,
) -> std::result::Result<(Manifest, HashingReader<R>), serde_json::Error> {
    let mut buffered = BufReader::new(HashingReader::new(reader));
    let manifest = serde_json::from_reader(&mut buffered)?;
    // Trailing whitespace is still part of the served file.
    io::copy(&mut buffered, &mut io::sink()).map_err(serde_json::Error::io)?;
    Ok((manifest, buffered.into_inner()))
}
