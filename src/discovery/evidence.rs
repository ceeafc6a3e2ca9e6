use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PostureError, Result};
use crate::ontology::{default_naming, related_with, IsResource, NamingStrategy, Resource, Timestamp};

/// A timestamped observation of one resource, ready for assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: Uuid,
    pub timestamp: Timestamp,
    pub cloud_service_id: String,
    pub tool_id: String,
    pub resource: Resource,
    /// Targets of the resource's relationships, in extraction order.
    pub experimental_related_resource_ids: Vec<String>,
}

impl Evidence {
    pub fn new(resource: &dyn IsResource, cloud_service_id: &str, tool_id: &str) -> Result<Self> {
        Self::with_naming(resource, cloud_service_id, tool_id, default_naming())
    }

    /// Like [`Evidence::new`], with related IDs found under `naming`.
    pub fn with_naming(
        resource: &dyn IsResource,
        cloud_service_id: &str,
        tool_id: &str,
        naming: &dyn NamingStrategy,
    ) -> Result<Self> {
        let wrapped = resource
            .to_resource()
            .ok_or_else(|| PostureError::NotOntologyResource(resource.get_id().to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            timestamp: Timestamp::now(),
            cloud_service_id: cloud_service_id.to_string(),
            tool_id: tool_id.to_string(),
            resource: wrapped,
            experimental_related_resource_ids: related_with(resource, naming)
                .into_iter()
                .map(|r| r.value)
                .collect(),
        })
    }
}
