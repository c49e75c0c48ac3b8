//! ollama2nix - Generate Nix expressions for Ollama models.
//!
//! Given a registry host and a model identifier, ollama2nix downloads the
//! model's manifest and emits a Nix expression that fetches every blob and
//! the manifest itself, then links them into the layout of an Ollama model
//! store (`blobs/` plus `manifests/<registry>/<model>/<version>`).
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Validated run configuration
//! - [`digest`] - SHA-256 digests and Nix content hashes
//! - [`error`] - Error types and result aliases
//! - [`generate`] - The fetch, plan and render pipeline
//! - [`manifest`] - Registry manifest schema
//! - [`model_ref`] - `name[:version]` parsing
//! - [`recipe`] - Recipe records and Nix rendering
//! - [`registry`] - Registry URLs and manifest download
//!
//! # Example
//!
//! ```
//! use ollama2nix::digest::to_content_hash;
//!
//! let hash = to_content_hash(
//!     "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
//! )
//! .unwrap();
//! assert_eq!(hash, "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
//! ```

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod model_ref;
pub mod recipe;
pub mod registry;

pub use error::{Ollama2NixError, Result};
