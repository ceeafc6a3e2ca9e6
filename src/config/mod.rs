use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::discovery::file::DEFAULT_MAX_DEPTH;
use crate::error::{PostureError, Result};
use crate::ontology::naming::DEFAULT_SUFFIXES;
use crate::ontology::SuffixNaming;

/// Name of the config file looked up in the collected directory.
pub const CONFIG_FILE: &str = ".cloudposture.toml";

/// Cloud service ID used when none is configured.
pub const DEFAULT_CLOUD_SERVICE_ID: &str = "00000000-0000-0000-0000-000000000000";

pub const DEFAULT_TOOL_ID: &str = "cloudposture";

/// Top-level configuration from `.cloudposture.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub relationships: RelationshipConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub cloud_service_id: String,
    pub tool_id: String,
    pub max_depth: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            cloud_service_id: DEFAULT_CLOUD_SERVICE_ID.into(),
            tool_id: DEFAULT_TOOL_ID.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipConfig {
    /// Field-name suffixes marking references, tried in order.
    pub suffixes: Vec<String>,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.discovery.cloud_service_id.is_empty() {
            return Err(PostureError::Config(
                "discovery.cloud_service_id must not be empty".into(),
            ));
        }
        if self.relationships.suffixes.is_empty() {
            return Err(PostureError::Config(
                "relationships.suffixes must list at least one suffix".into(),
            ));
        }
        if self.relationships.suffixes.iter().any(|s| s.is_empty()) {
            return Err(PostureError::Config(
                "relationships.suffixes must not contain empty entries".into(),
            ));
        }
        Ok(())
    }

    /// Naming convention built from `[relationships]`.
    pub fn naming(&self) -> SuffixNaming {
        SuffixNaming::new(self.relationships.suffixes.iter().cloned())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# cloudposture configuration

[discovery]
# Cloud service the collected resources are attributed to.
cloud_service_id = "00000000-0000-0000-0000-000000000000"

# Tool ID stamped on evidence.
tool_id = "cloudposture"

# How many directory levels below the collected path are searched.
max_depth = 3

[relationships]
# Field-name suffixes that mark references to other resources.
suffixes = ["_id", "_ids"]
"#
    }
}
