//! The generation pipeline.
//!
//! Resolve the manifest URL, fetch and hash the manifest, plan the recipe,
//! render it. Each stage runs once, in order, and any failure ends the run
//! before anything is written.

use std::io::Write;

use crate::config::Config;
use crate::error::{Ollama2NixError, Result};
use crate::recipe::{plan, render};
use crate::registry::ManifestFetcher;

/// Fetch the manifest for `config.model` and render its Nix recipe.
pub fn generate(config: &Config) -> Result<String> {
    let fetcher = ManifestFetcher::new()?;
    let url = config.endpoint.manifest_url(&config.model);

    tracing::debug!(model = %config.model, registry = config.endpoint.host(), "Generating recipe");

    let fetched = fetcher.fetch(&url)?;
    let recipe = plan(&config.endpoint, &config.model, &fetched, config.plan)?;
    Ok(render(&recipe))
}

/// Generate the recipe and write it to the configured destination.
pub fn run(config: &Config) -> Result<()> {
    let recipe = generate(config)?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, &recipe).map_err(|source| Ollama2NixError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Wrote recipe");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(recipe.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| Ollama2NixError::Io {
                    path: "<stdout>".into(),
                    source,
                })?;
        }
    }

    Ok(())
}
