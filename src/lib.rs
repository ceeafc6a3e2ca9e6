//! cloudposture: typed cloud security ontology.
//!
//! Discovered cloud resources are modelled as variants of one tagged union.
//! Each variant knows its type chain and its fields, which is enough to find
//! the resources it references and to project it into a flat property map
//! for storage and assessment.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use cloudposture::{collect, CollectOptions};
//!
//! let report = collect(Path::new("./exports"), &CollectOptions::default()).unwrap();
//! println!("Resources: {}, Edges: {}", report.resources.len(), report.edges.len());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod ontology;
pub mod output;

use std::path::{Path, PathBuf};

use serde::Serialize;

use config::{Config, CONFIG_FILE};
use discovery::{Discovered, Discoverer, Evidence, JsonFileDiscoverer};
use error::Result;
use graph::GraphEdge;
use ontology::{
    related_with, resource_map, resource_types, IsResource, NamingStrategy, Relationship,
    ResourceProperties,
};
use output::OutputFormat;

/// Options for a collect invocation.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Path to config file (defaults to `.cloudposture.toml` in the collected dir).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for the configured cloud service ID.
    pub cloud_service_id_override: Option<String>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            cloud_service_id_override: None,
        }
    }
}

/// One resource after projection.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedResource {
    pub id: String,
    pub name: String,
    pub types: Vec<String>,
    pub properties: ResourceProperties,
    pub relationships: Vec<Relationship>,
    pub evidence: Evidence,
}

/// A resource that could not be projected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionFailure {
    pub resource_id: String,
    pub message: String,
}

/// Complete collect report.
#[derive(Debug, Clone, Serialize)]
pub struct CollectReport {
    pub source_name: String,
    pub cloud_service_id: String,
    pub resources: Vec<ProjectedResource>,
    pub edges: Vec<GraphEdge>,
    pub failures: Vec<ProjectionFailure>,
}

impl CollectReport {
    /// 0 if every resource was projected, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() {
            0
        } else {
            1
        }
    }
}

/// Project a single resource: canonical map, relationships and evidence
/// attributed to `cloud_service_id`.
pub fn project(
    resource: &dyn IsResource,
    cloud_service_id: &str,
    config: &Config,
    naming: &dyn NamingStrategy,
) -> Result<ProjectedResource> {
    let properties = resource_map(resource)?;
    let evidence = Evidence::with_naming(
        resource,
        cloud_service_id,
        &config.discovery.tool_id,
        naming,
    )?;

    Ok(ProjectedResource {
        id: resource.get_id().to_string(),
        name: resource.get_name().to_string(),
        types: resource_types(resource).iter().map(|t| t.to_string()).collect(),
        properties,
        relationships: related_with(resource, naming),
        evidence,
    })
}

/// Project a batch. A resource that fails is logged and recorded, the rest
/// still go through.
pub fn project_all(source_name: &str, discovered: &[Discovered], config: &Config) -> CollectReport {
    let naming = config.naming();
    let mut projected = Vec::with_capacity(discovered.len());
    let mut failures = Vec::new();
    let mut edges = Vec::new();

    for Discovered {
        cloud_service_id,
        resource,
        ..
    } in discovered
    {
        edges.extend(graph::resource_edges(resource.as_ref(), &naming));
        match project(resource.as_ref(), cloud_service_id, config, &naming) {
            Ok(p) => projected.push(p),
            Err(e) => {
                tracing::warn!(resource = %resource.get_id(), error = %e, "projection failed");
                failures.push(ProjectionFailure {
                    resource_id: resource.get_id().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    CollectReport {
        source_name: source_name.to_string(),
        cloud_service_id: config.discovery.cloud_service_id.clone(),
        resources: projected,
        edges,
        failures,
    }
}

/// Run a complete collection: load config, discover, project, build the graph.
pub fn collect(path: &Path, options: &CollectOptions) -> Result<CollectReport> {
    // Load config
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        let dir = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };
        dir.join(CONFIG_FILE)
    });
    let mut config = Config::load(&config_path)?;

    // Apply CLI override
    if let Some(id) = &options.cloud_service_id_override {
        config.discovery.cloud_service_id = id.clone();
    }

    let discoverers: Vec<Box<dyn Discoverer>> = vec![Box::new(
        JsonFileDiscoverer::new(path, config.discovery.cloud_service_id.clone())
            .with_max_depth(config.discovery.max_depth),
    )];
    let discovered = discovery::discover_all(&discoverers, &path.display().to_string())?;

    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".into());

    Ok(project_all(&source_name, &discovered, &config))
}

/// Render a collect report in the specified format.
pub fn render_report(report: &CollectReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
