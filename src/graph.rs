//! Relationship graph over a batch of resources.

use serde::{Deserialize, Serialize};

use crate::ontology::{default_naming, related_with, IsResource, NamingStrategy};

/// A directed edge from a resource to one it references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// `<source>-<target>`.
    pub id: String,
    pub source: String,
    pub target: String,
    /// The relationship property, e.g. `parent` or `block_storage`.
    #[serde(rename = "type")]
    pub edge_type: String,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str, edge_type: &str) -> Self {
        Self {
            id: format!("{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
            edge_type: edge_type.to_string(),
        }
    }
}

/// Edges of every resource under the default naming convention.
pub fn edges(resources: &[Box<dyn IsResource>]) -> Vec<GraphEdge> {
    edges_with(resources, default_naming())
}

/// Edges of every resource, in resource order.
pub fn edges_with(resources: &[Box<dyn IsResource>], naming: &dyn NamingStrategy) -> Vec<GraphEdge> {
    resources
        .iter()
        .flat_map(|r| resource_edges(r.as_ref(), naming))
        .collect()
}

/// Outgoing edges of one resource. Relationships with an empty target do not
/// become edges.
pub fn resource_edges(resource: &dyn IsResource, naming: &dyn NamingStrategy) -> Vec<GraphEdge> {
    related_with(resource, naming)
        .into_iter()
        .filter(|rel| !rel.value.is_empty())
        .map(|rel| GraphEdge::new(resource.get_id(), &rel.value, &rel.property))
        .collect()
}
