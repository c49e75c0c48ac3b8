//! Command-line interface for ollama2nix.
//!
//! - [`args`] - Argument definitions using clap derive macros

pub mod args;

pub use args::Cli;
