//! In-memory DevWorkspace client
//!
//! Keeps DevWorkspaces in a process-local store with the same observable
//! behavior the gateway expects from a cluster-backed client. Used for local
//! development and tests.

use crate::client::{ClientFactory, Credentials, DevWorkspaceClient};
use crate::devworkspace::{
    DevWorkspace, DevWorkspaceMetadata, DevWorkspaceSpec, Devfile, PatchOperation,
    DEVWORKSPACE_API_VERSION, DEVWORKSPACE_KIND,
};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use chrono::Utc;
use json_patch::PatchErrorKind;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const GENERATED_SUFFIX_LEN: usize = 5;

#[derive(Debug, Default)]
struct Store {
    workspaces: BTreeMap<(String, String), DevWorkspace>,
    revision: u64,
}

impl Store {
    fn next_revision(&mut self) -> String {
        self.revision += 1;
        self.revision.to_string()
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryClient {
    store: Arc<RwLock<Store>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored DevWorkspaces across all namespaces.
    pub async fn len(&self) -> usize {
        self.store.read().await.workspaces.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_string(), name.to_string())
}

/// Parse the forwarded operations as an RFC 6902 document.
fn parse_patch(operations: &[PatchOperation]) -> Result<json_patch::Patch> {
    serde_json::from_value(serde_json::to_value(operations)?)
        .map_err(|e| ClientError::Invalid(format!("invalid JSON Patch document: {}", e)))
}

fn generate_name(prefix: &str) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(GENERATED_SUFFIX_LEN)
        .collect();
    format!("{}{}", prefix, suffix)
}

#[async_trait]
impl DevWorkspaceClient for InMemoryClient {
    async fn create(
        &self,
        devfile: Devfile,
        routing_class: &str,
        started: bool,
    ) -> Result<DevWorkspace> {
        let template = devfile.template();
        let metadata = devfile.metadata.unwrap_or_default();

        let namespace = metadata
            .namespace
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| ClientError::Invalid("metadata.namespace is required".to_string()))?;

        let name = match (metadata.name, metadata.generate_name) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(prefix)) if !prefix.is_empty() => generate_name(&prefix),
            _ => {
                return Err(ClientError::Invalid(
                    "metadata.name or metadata.generateName is required".to_string(),
                ))
            }
        };

        let mut store = self.store.write().await;
        let id = key(&namespace, &name);
        if store.workspaces.contains_key(&id) {
            return Err(ClientError::AlreadyExists { namespace, name });
        }

        let workspace = DevWorkspace {
            api_version: DEVWORKSPACE_API_VERSION.to_string(),
            kind: DEVWORKSPACE_KIND.to_string(),
            metadata: DevWorkspaceMetadata {
                name,
                namespace,
                uid: Some(Uuid::new_v4().to_string()),
                resource_version: Some(store.next_revision()),
                creation_timestamp: Some(Utc::now()),
                labels: metadata.labels,
                annotations: metadata.annotations,
                extra: metadata.extra,
            },
            spec: DevWorkspaceSpec {
                started,
                routing_class: Some(routing_class.to_string()),
                template,
                extra: BTreeMap::new(),
            },
            status: None,
        };

        store.workspaces.insert(id, workspace.clone());
        tracing::info!(
            "Created DevWorkspace {}/{} (started: {}, routing class: {})",
            workspace.namespace(),
            workspace.name(),
            started,
            routing_class
        );

        Ok(workspace)
    }

    async fn patch(
        &self,
        namespace: &str,
        name: &str,
        operations: Vec<PatchOperation>,
    ) -> Result<DevWorkspace> {
        let mut store = self.store.write().await;
        let id = key(namespace, name);
        let current = store
            .workspaces
            .get(&id)
            .ok_or_else(|| ClientError::not_found(namespace, name))?;

        let patch = parse_patch(&operations)?;
        let mut document = serde_json::to_value(current)?;
        json_patch::patch(&mut document, &patch.0).map_err(|e| match e.kind {
            PatchErrorKind::TestFailed => {
                ClientError::Invalid(format!("patch test failed: {}", e))
            }
            _ => ClientError::Invalid(e.to_string()),
        })?;

        let mut patched: DevWorkspace = serde_json::from_value(document)
            .map_err(|e| ClientError::Invalid(format!("patched DevWorkspace is invalid: {}", e)))?;

        if patched.namespace() != namespace || patched.name() != name {
            return Err(ClientError::Invalid(
                "metadata.name and metadata.namespace are immutable".to_string(),
            ));
        }

        patched.metadata.resource_version = Some(store.next_revision());
        store.workspaces.insert(id, patched.clone());
        tracing::info!(
            "Patched DevWorkspace {}/{} with {} operation(s)",
            namespace,
            name,
            operations.len()
        );

        Ok(patched)
    }

    async fn list_in_namespace(&self, namespace: &str) -> Result<Vec<DevWorkspace>> {
        let store = self.store.read().await;
        Ok(store
            .workspaces
            .values()
            .filter(|workspace| workspace.namespace() == namespace)
            .cloned()
            .collect())
    }

    async fn get_by_name(&self, namespace: &str, name: &str) -> Result<DevWorkspace> {
        self.store
            .read()
            .await
            .workspaces
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| ClientError::not_found(namespace, name))
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        self.store
            .write()
            .await
            .workspaces
            .remove(&key(namespace, name))
            .ok_or_else(|| ClientError::not_found(namespace, name))?;

        tracing::info!("Deleted DevWorkspace {}/{}", namespace, name);
        Ok(())
    }
}

/// Hands every authenticated caller a view of one shared in-memory store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryClientFactory {
    client: InMemoryClient,
}

impl InMemoryClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: InMemoryClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &InMemoryClient {
        &self.client
    }
}

#[async_trait]
impl ClientFactory for InMemoryClientFactory {
    async fn client_for(&self, credentials: &Credentials) -> Result<Arc<dyn DevWorkspaceClient>> {
        if credentials.token().trim().is_empty() {
            return Err(ClientError::Unauthorized("empty bearer token".to_string()));
        }
        Ok(Arc::new(self.client.clone()))
    }
}
