//! Model registry access.
//!
//! - [`url`] - Manifest and blob URL construction
//! - [`fetch`] - Manifest download with content hashing

pub mod fetch;
pub mod url;

pub use fetch::{FetchedManifest, HashingReader, ManifestFetcher};
pub use url::{RegistryEndpoint, Scheme, DEFAULT_REGISTRY};
