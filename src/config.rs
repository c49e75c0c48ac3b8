//! Run configuration.
//!
//! [`Config`] is built once from the command line and passed by reference
//! to the pipeline. It is never modified afterwards.

use std::path::PathBuf;

use crate::error::{Ollama2NixError, Result};
use crate::model_ref::ModelRef;
use crate::recipe::PlanOptions;
use crate::registry::{RegistryEndpoint, Scheme};

/// Validated settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: RegistryEndpoint,
    pub model: ModelRef,
    pub plan: PlanOptions,
    /// Write the recipe here instead of stdout.
    pub output: Option<PathBuf>,
}

impl Config {
    /// Validate the registry host and model identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use ollama2nix::config::Config;
    /// use ollama2nix::registry::Scheme;
    ///
    /// let config = Config::new("registry.ollama.ai", "mistral-nemo", Scheme::Https).unwrap();
    /// assert_eq!(config.model.version, "latest");
    /// ```
    pub fn new(registry: &str, model: &str, scheme: Scheme) -> Result<Self> {
        if model.is_empty() {
            return Err(Ollama2NixError::Config {
                message: "model is required".to_string(),
            });
        }

        let model = ModelRef::parse(model);
        if model.name.is_empty() {
            return Err(Ollama2NixError::Config {
                message: format!("model name is empty in {:?}", model.to_string()),
            });
        }
        if model.version.is_empty() {
            return Err(Ollama2NixError::Config {
                message: format!("model version is empty in \"{}:\"", model.name),
            });
        }
        if model
            .name
            .split('/')
            .any(|part| part.is_empty() || is_dot_segment(part))
        {
            return Err(Ollama2NixError::Config {
                message: format!("invalid model name {:?}", model.name),
            });
        }
        if model.version.contains('/') || is_dot_segment(&model.version) {
            return Err(Ollama2NixError::Config {
                message: format!("invalid model version {:?}", model.version),
            });
        }

        Ok(Self {
            endpoint: RegistryEndpoint::new(registry, scheme)?,
            model,
            plan: PlanOptions::default(),
            output: None,
        })
    }

    /// Set recipe planning options.
    pub fn with_plan(mut self, plan: PlanOptions) -> Self {
        self.plan = plan;
        self
    }

    /// Write the recipe to `path`.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

/// `.` and `..` are resolved away by URL paths and by the shell.
fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}
