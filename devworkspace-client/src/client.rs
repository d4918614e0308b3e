use crate::devworkspace::{DevWorkspace, Devfile, PatchOperation};
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Credentials of the caller a client is built for.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Operations on DevWorkspace custom resources.
///
/// Implementations talk to the cluster on behalf of a single caller and must
/// be safe to use from concurrent requests.
#[async_trait]
pub trait DevWorkspaceClient: Send + Sync {
    /// Create a DevWorkspace from `devfile` in the devfile's namespace.
    async fn create(
        &self,
        devfile: Devfile,
        routing_class: &str,
        started: bool,
    ) -> Result<DevWorkspace>;

    /// Apply JSON Patch operations, in order, to an existing DevWorkspace.
    async fn patch(
        &self,
        namespace: &str,
        name: &str,
        operations: Vec<PatchOperation>,
    ) -> Result<DevWorkspace>;

    async fn list_in_namespace(&self, namespace: &str) -> Result<Vec<DevWorkspace>>;

    async fn get_by_name(&self, namespace: &str, name: &str) -> Result<DevWorkspace>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<()>;
}

/// Builds a [`DevWorkspaceClient`] for the caller of a single request.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn client_for(&self, credentials: &Credentials) -> Result<Arc<dyn DevWorkspaceClient>>;
}
