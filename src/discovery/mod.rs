//! Producers of ontology resources.
//!
//! A [`Discoverer`] enumerates resources of one provider and hands them out as
//! fully populated [`IsResource`] values. Everything downstream only relies on
//! that trait.

pub mod evidence;
pub mod file;
pub mod raw;

use serde::{Deserialize, Serialize};

use crate::error::{PostureError, Result};
use crate::ontology::{resource_types, AsResource, IsResource, Resource};

pub use evidence::Evidence;
pub use file::JsonFileDiscoverer;
pub use raw::Raw;

/// Enumerates the resources of one provider and translates them into the
/// ontology.
pub trait Discoverer: Send + Sync {
    fn name(&self) -> &str;

    fn list(&self) -> Result<Vec<Box<dyn IsResource>>>;

    /// Cloud service the discovered resources belong to.
    fn cloud_service_id(&self) -> &str;
}

/// A resource as handed to the storage layer: identifier, flattened type
/// chain and the full resource union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResource {
    pub id: String,
    /// Type chain joined with commas, e.g. `ObjectStorage,Storage,CloudResource,Resource`.
    pub resource_type: String,
    pub cloud_service_id: String,
    pub properties: Resource,
}

impl DiscoveryResource {
    pub fn to_ontology_resource(&self) -> Box<dyn IsResource> {
        self.properties.clone().into_boxed()
    }
}

/// Wraps `resource` for storage. Fails for variants outside the schema.
pub fn to_discovery_resource(
    resource: &dyn IsResource,
    cloud_service_id: &str,
) -> Result<DiscoveryResource> {
    let properties = resource
        .to_resource()
        .ok_or_else(|| PostureError::NotOntologyResource(resource.get_id().to_string()))?;

    Ok(DiscoveryResource {
        id: resource.get_id().to_string(),
        resource_type: resource_types(resource).join(","),
        cloud_service_id: cloud_service_id.to_string(),
        properties,
    })
}

/// A resource together with the discoverer that produced it.
#[derive(Debug)]
pub struct Discovered {
    pub discoverer: String,
    pub cloud_service_id: String,
    pub resource: Box<dyn IsResource>,
}

impl Discovered {
    pub fn new(
        discoverer: impl Into<String>,
        cloud_service_id: impl Into<String>,
        resource: Box<dyn IsResource>,
    ) -> Self {
        Self {
            discoverer: discoverer.into(),
            cloud_service_id: cloud_service_id.into(),
            resource,
        }
    }
}

/// Run every discoverer and pool their resources.
///
/// A failing discoverer is logged and skipped; its siblings still contribute.
/// Errors only if nothing at all was discovered: with the first discoverer
/// error if every discoverer failed, with `NoResources` otherwise.
pub fn discover_all(discoverers: &[Box<dyn Discoverer>], origin: &str) -> Result<Vec<Discovered>> {
    let mut all = Vec::new();
    let mut first_error = None;
    let mut failed = 0;

    for discoverer in discoverers {
        match discoverer.list() {
            Ok(resources) => {
                tracing::debug!(
                    discoverer = discoverer.name(),
                    count = resources.len(),
                    "discovered resources"
                );
                all.extend(resources.into_iter().map(|resource| {
                    Discovered::new(discoverer.name(), discoverer.cloud_service_id(), resource)
                }));
            }
            Err(e) => {
                tracing::warn!(
                    discoverer = discoverer.name(),
                    error = %e,
                    "discoverer failed, skipping"
                );
                failed += 1;
                first_error.get_or_insert(e);
            }
        }
    }

    if all.is_empty() {
        return match first_error {
            Some(e) if failed == discoverers.len() => Err(e),
            _ => Err(PostureError::NoResources(origin.to_string())),
        };
    }

    Ok(all)
}
