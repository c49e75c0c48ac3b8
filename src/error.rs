//! Error types for ollama2nix operations.
//!
//! This module defines [`Ollama2NixError`], the error type produced by every
//! stage of the pipeline, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every stage maps its failures into one variant with a stage prefix
//! - Nothing is retried; errors propagate with `?` to `main`
//! - `main` prints the message to stderr and exits non-zero

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ollama2nix operations.
#[derive(Debug, Error)]
pub enum Ollama2NixError {
    /// Missing or invalid command-line configuration.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// The manifest request could not be issued or the connection failed.
    #[error("failed to download manifest from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("failed to download manifest from {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The response body is not a manifest.
    #[error("failed to decode manifest from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A digest string is not `sha256:` followed by 64 hex characters.
    #[error("failed to convert blob hash {digest:?}: {source}")]
    Encoding {
        digest: String,
        #[source]
        source: hex::FromHexError,
    },

    /// Failed to write the generated recipe.
    #[error("failed to write recipe to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ollama2nix operations.
pub type Result<T> = std::result::Result<T, Ollama2NixError>;
