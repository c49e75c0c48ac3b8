//! Registry manifest schema.
//!
//! Decoding is lenient: absent fields take their default value and unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// An image manifest as served by `/v2/<repo>/manifests/<tag>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: i64,
    pub media_type: String,
    pub config: Layer,
    pub layers: Vec<Layer>,
}

/// A content-addressed blob referenced by a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layer {
    /// `sha256:<hex>` digest.
    pub digest: String,
    pub media_type: String,
    pub size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISTRAL_NEMO: &str = r#"{
 "schemaVersion": 2,
 "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
 "config": {
   "digest": "sha256:65d37de20e5951c7434ad4230c51a4d5be99b8cb7407d2135074d82c40b44b45",
   "mediaType": "application/vnd.docker.container.image.v1+json",
   "size": 486
 },
 "layers": [
   {
     "digest": "sha256:b559938ab7a0392fc9ea9675b82280f2a15669ec3e0e0fc491c9cb0a7681cf94",
     "mediaType": "application/vnd.ollama.image.model",
     "size": 7071700672
   },
   {
     "digest": "sha256:f023d1ce0e55d0dcdeaf70ad81555c2a20822ed607a7abd8de3c3131360f5f0a",
     "mediaType": "application/vnd.ollama.image.template",
     "size": 688
   }
 ]
}"#;

    #[test]
    fn decodes_registry_manifest() {
        let manifest: Manifest = serde_json::from_str(MISTRAL_NEMO).unwrap();
        assert_eq!(manifest.schema_version, 2);
        assert_eq!(manifest.config.size, 486);
        assert_eq!(manifest.layers.len(), 2);
        assert_eq!(manifest.layers[0].size, 7_071_700_672);
        assert_eq!(
            manifest.layers[1].media_type,
            "application/vnd.ollama.image.template"
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"layers": [{"digest": "sha256:00"}]}"#).unwrap();
        assert_eq!(manifest.schema_version, 0);
        assert_eq!(manifest.config, Layer::default());
        assert_eq!(manifest.layers[0].size, 0);
        assert!(manifest.layers[0].media_type.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"schemaVersion": 2, "annotations": {"a": "b"}}"#).unwrap();
        assert_eq!(manifest.schema_version, 2);
        assert!(manifest.layers.is_empty());
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(serde_json::from_str::<Manifest>(r#"{"layers": "nope"}"#).is_err());
    }
}
