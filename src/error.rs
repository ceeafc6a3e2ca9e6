use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostureError>;

#[derive(Error, Debug)]
pub enum PostureError {
    #[error("Could not serialize resource {resource}: {source}")]
    Serialization {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Resource {0} did not serialize into a JSON object")]
    NotAnObject(String),

    #[error("Resource {0} is not a valid ontology resource")]
    NotOntologyResource(String),

    #[error("Discoverer error ({discoverer}): {message}")]
    Discovery { discoverer: String, message: String },

    #[error("No resources found at: {0}")]
    NoResources(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PostureError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
