//! Building recipe records from registry data.

use super::{blob_symbol, BlobFetch, ManifestFetch, Recipe};
use crate::digest::Sha256Digest;
use crate::error::Result;
use crate::manifest::Layer;
use crate::model_ref::ModelRef;
use crate::registry::{FetchedManifest, RegistryEndpoint};

/// Options that change which blobs end up in the recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Also fetch the manifest's config blob, after the layers.
    pub include_config: bool,
}

/// Build the recipe for `model` from its fetched manifest.
///
/// Fails with an encoding error if any layer digest is not
/// `sha256:<64 hex>`.
pub fn plan(
    endpoint: &RegistryEndpoint,
    model: &ModelRef,
    fetched: &FetchedManifest,
    options: PlanOptions,
) -> Result<Recipe> {
    let mut layers: Vec<&Layer> = fetched.manifest.layers.iter().collect();
    if options.include_config {
        layers.push(&fetched.manifest.config);
    }

    let blobs = layers
        .into_iter()
        .enumerate()
        .map(|(index, layer)| blob_fetch(endpoint, &model.name, index, layer))
        .collect::<Result<Vec<_>>>()?;

    let manifest = ManifestFetch {
        url: fetched.url.to_string(),
        hash: fetched.digest.to_content_hash(),
        dir: format!("manifests/{}/{}", endpoint.host(), model.name),
        file_name: model.version.clone(),
    };

    tracing::debug!(
        blobs = blobs.len(),
        manifest_hash = %manifest.hash,
        "Planned recipe"
    );

    Ok(Recipe { blobs, manifest })
}

fn blob_fetch(
    endpoint: &RegistryEndpoint,
    model_name: &str,
    index: usize,
    layer: &Layer,
) -> Result<BlobFetch> {
    let digest = Sha256Digest::parse(&layer.digest)?;
    Ok(BlobFetch {
        symbol: blob_symbol(index),
        url: endpoint.blob_url(model_name, &layer.digest).to_string(),
        hash: digest.to_content_hash(),
        file_name: digest.blob_file_name(),
    })
}
