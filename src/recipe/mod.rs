//! Nix recipe generation.
//!
//! A [`Recipe`] is an ordered list of fetch declarations plus the layout of
//! the joined output. [`plan`] builds it from a fetched manifest and
//! [`render`] turns it into a Nix expression in a single pass.
//!
//! # Architecture
//!
//! - [`plan`] - Builds the declaration records from registry data
//! - [`render`] - Formats records as Nix text

pub mod plan;
pub mod render;

pub use plan::{plan, PlanOptions};
pub use render::render;

/// Symbol bound to the fetched manifest file.
pub const MANIFEST_SYMBOL: &str = "manifestFile";

/// Name of the joined derivation.
pub const DERIVATION_NAME: &str = "models";

/// Extra arguments passed to curl for every fetch.
///
/// Registries redirect blob and manifest requests to object storage;
/// `-L` follows the redirect and the explicit `Accept` avoids content
/// negotiation there.
pub const CURL_OPTS: [&str; 3] = ["-L", "-H", "Accept:application/octet-stream"];

/// A `fetchurl` declaration for one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobFetch {
    /// Local binding, `blob_<n>`.
    pub symbol: String,
    pub url: String,
    /// `sha256-<base64>` content hash.
    pub hash: String,
    /// Store name and link name under `blobs/`, `sha256-<hex>`.
    pub file_name: String,
}

/// The `fetchurl` declaration for the manifest itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFetch {
    pub url: String,
    /// `sha256-<base64>` of the manifest bytes.
    pub hash: String,
    /// Directory under `$out`, `manifests/<registry>/<model>`.
    pub dir: String,
    /// File name inside `dir`, the model version.
    pub file_name: String,
}

/// Everything needed to render the Nix expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Blob fetches in manifest order.
    pub blobs: Vec<BlobFetch>,
    pub manifest: ManifestFetch,
}

impl Recipe {
    /// Symbols joined into the output: every blob, then the manifest.
    pub fn inputs(&self) -> Vec<&str> {
        self.blobs
            .iter()
            .map(|blob| blob.symbol.as_str())
            .chain(std::iter::once(MANIFEST_SYMBOL))
            .collect()
    }
}

/// Binding name of the blob at `index`.
pub fn blob_symbol(index: usize) -> String {
    format!("blob_{}", index)
}
