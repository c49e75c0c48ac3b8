//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::recipe::PlanOptions;
use crate::registry::{Scheme, DEFAULT_REGISTRY};

/// ollama2nix - Generate a Nix expression that fetches an Ollama model.
#[derive(Debug, Parser)]
#[command(name = "ollama2nix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry to download models from
    #[arg(short, long, default_value = DEFAULT_REGISTRY)]
    pub registry: String,

    /// Model to download, e.g. mistral-nemo or mistral-nemo:7b
    #[arg(short, long)]
    pub model: String,

    /// Write the recipe to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also fetch the model's config blob
    #[arg(long)]
    pub with_config: bool,

    /// Talk to the registry over plain HTTP
    #[arg(long)]
    pub plain_http: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate the arguments into a run [`Config`].
    pub fn to_config(&self) -> Result<Config> {
        let scheme = if self.plain_http {
            Scheme::Http
        } else {
            Scheme::Https
        };

        let config = Config::new(&self.registry, &self.model, scheme)?.with_plan(PlanOptions {
            include_config: self.with_config,
        });

        Ok(match &self.output {
            Some(path) => config.with_output(path),
            None => config,
        })
    }
}
