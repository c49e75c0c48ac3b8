//! Model identifier parsing.
//!
//! A model is named as `name` or `name:version`. Only the first colon
//! separates the two parts, so `a:b:c` names model `a` at version `b:c`.

use std::fmt;

/// Version used when the identifier carries none.
pub const DEFAULT_VERSION: &str = "latest";

/// A model name plus the version (tag) requested from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    /// Model name, e.g. `mistral-nemo`.
    pub name: String,
    /// Model version, e.g. `7b`. Defaults to [`DEFAULT_VERSION`].
    pub version: String,
}

impl ModelRef {
    /// Split an identifier at its first colon.
    ///
    /// Never fails; an empty name is rejected later by
    /// [`Config`](crate::config::Config) validation.
    ///
    /// # Example
    ///
    /// ```
    /// use ollama2nix::model_ref::ModelRef;
    ///
    /// let model = ModelRef::parse("mistral-nemo:7b");
    /// assert_eq!(model.name, "mistral-nemo");
    /// assert_eq!(model.version, "7b");
    /// ```
    pub fn parse(identifier: &str) -> Self {
        let (name, version) = identifier
            .split_once(':')
            .unwrap_or((identifier, DEFAULT_VERSION));
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}
