use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("DevWorkspace not found: {namespace}/{name}")]
    NotFound { namespace: String, name: String },

    #[error("DevWorkspace already exists: {namespace}/{name}")]
    AlreadyExists { namespace: String, name: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid DevWorkspace: {0}")]
    Invalid(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cluster unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn not_found(namespace: &str, name: &str) -> Self {
        ClientError::NotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}
