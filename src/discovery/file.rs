use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{DiscoveryResource, Discoverer};
use crate::error::{PostureError, Result};
use crate::ontology::{AsResource, IsResource, Resource};

/// Default directory depth searched below the root.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Reads resources from JSON exports on disk.
///
/// Every `*.json` file below the root is loaded. A file may hold a single
/// resource union (`{"cloudResource": ...}`), a stored discovery record
/// (`{"id", "resourceType", "cloudServiceId", "properties"}`) or an array of
/// either. Hidden and git-ignored paths are skipped.
pub struct JsonFileDiscoverer {
    root: PathBuf,
    cloud_service_id: String,
    max_depth: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Record(DiscoveryResource),
    Records(Vec<DiscoveryResource>),
    Resource(Resource),
    Resources(Vec<Resource>),
}

impl Export {
    fn into_resources(self) -> Vec<Resource> {
        match self {
            Export::Record(r) => vec![r.properties],
            Export::Records(rs) => rs.into_iter().map(|r| r.properties).collect(),
            Export::Resource(r) => vec![r],
            Export::Resources(rs) => rs,
        }
    }
}

impl JsonFileDiscoverer {
    pub fn new(root: impl Into<PathBuf>, cloud_service_id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            cloud_service_id: cloud_service_id.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn json_files(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        let walker = ignore::WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .max_depth(Some(self.max_depth))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        walker
            .flatten()
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
            .collect()
    }

    fn load_file(path: &Path) -> Result<Vec<Resource>> {
        let content = std::fs::read_to_string(path)?;
        let export: Export = serde_json::from_str(&content)?;
        Ok(export.into_resources())
    }
}

impl Discoverer for JsonFileDiscoverer {
    fn name(&self) -> &str {
        "json-file"
    }

    fn list(&self) -> Result<Vec<Box<dyn IsResource>>> {
        if !self.root.exists() {
            return Err(PostureError::Discovery {
                discoverer: self.name().to_string(),
                message: format!("{} does not exist", self.root.display()),
            });
        }

        let mut resources = Vec::new();
        for path in self.json_files() {
            match Self::load_file(&path) {
                Ok(found) => {
                    tracing::debug!(path = %path.display(), count = found.len(), "loaded export");
                    resources.extend(found.into_iter().map(AsResource::into_boxed));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable export");
                }
            }
        }

        Ok(resources)
    }

    fn cloud_service_id(&self) -> &str {
        &self.cloud_service_id
    }
}
