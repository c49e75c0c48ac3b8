//! Registry URL construction.
//!
//! Every path segment is percent-escaped independently, so a model name,
//! version or digest containing `/`, `?`, `#` or spaces cannot change the
//! shape of the request path. Segments that are exactly `.` or `..` are
//! dropped by URL path normalization, so
//! [`Config`](crate::config::Config) rejects them before a URL is built.

use reqwest::Url;
use std::fmt;

use crate::error::{Ollama2NixError, Result};
use crate::model_ref::ModelRef;

/// Registry used when none is given.
pub const DEFAULT_REGISTRY: &str = "registry.ollama.ai";

/// Repository namespace of official models.
const NAMESPACE: &str = "library";

/// URL scheme used to reach the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registry host plus the scheme used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoint {
    host: String,
    base: Url,
}

impl RegistryEndpoint {
    /// Validate `host` (optionally with a port) and build the endpoint.
    pub fn new(host: &str, scheme: Scheme) -> Result<Self> {
        let invalid = |reason: String| Ollama2NixError::Config {
            message: format!("invalid registry host {:?}: {}", host, reason),
        };

        if host.is_empty() {
            return Err(Ollama2NixError::Config {
                message: "registry is required".to_string(),
            });
        }

        let base = Url::parse(&format!("{}://{}/", scheme, host))
            .map_err(|e| invalid(e.to_string()))?;
        if base.path() != "/" || base.query().is_some() || base.fragment().is_some() {
            return Err(invalid("expected a host name, not a URL".to_string()));
        }
        if !base.username().is_empty() || base.password().is_some() {
            return Err(invalid("credentials are not supported".to_string()));
        }

        Ok(Self {
            host: host.to_string(),
            base,
        })
    }

    /// The host as given on the command line.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        self.base.scheme()
    }

    /// `/v2/library/<name>/manifests/<version>`
    pub fn manifest_url(&self, model: &ModelRef) -> Url {
        self.url(&["v2", NAMESPACE, &model.name, "manifests", &model.version])
    }

    /// `/v2/library/<name>/blobs/<digest>`
    pub fn blob_url(&self, model_name: &str, digest: &str) -> Url {
        self.url(&["v2", NAMESPACE, model_name, "blobs", digest])
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) URLs always have a hierarchical path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
