//! Test doubles for code that consumes a [`DevWorkspaceClient`].

use crate::client::{ClientFactory, Credentials, DevWorkspaceClient};
use crate::devworkspace::{
    DevWorkspace, DevWorkspaceMetadata, DevWorkspaceSpec, Devfile, PatchOperation,
    DEVWORKSPACE_API_VERSION, DEVWORKSPACE_KIND,
};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A single call received by a [`RecordingClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Create {
        devfile: Devfile,
        routing_class: String,
        started: bool,
    },
    Patch {
        namespace: String,
        name: String,
        operations: Vec<PatchOperation>,
    },
    List {
        namespace: String,
    },
    Get {
        namespace: String,
        name: String,
    },
    Delete {
        namespace: String,
        name: String,
    },
}

/// Client that records every call and answers from a script.
///
/// Queued errors are returned first, one per call. Without a queued error,
/// `create`/`patch`/`get` echo back a DevWorkspace built from their input and
/// `list` returns the configured listing.
#[derive(Clone, Default)]
pub struct RecordingClient {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    errors: Arc<Mutex<VecDeque<ClientError>>>,
    listing: Arc<Mutex<Vec<DevWorkspace>>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ClientError) {
        self.errors
            .lock()
            .expect("errors lock poisoned")
            .push_back(error);
    }

    pub fn set_listing(&self, workspaces: Vec<DevWorkspace>) {
        *self.listing.lock().expect("listing lock poisoned") = workspaces;
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        self.calls.lock().expect("calls lock poisoned").push(call);
        match self.errors.lock().expect("errors lock poisoned").pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Minimal DevWorkspace for fixtures.
pub fn sample_devworkspace(namespace: &str, name: &str) -> DevWorkspace {
    DevWorkspace {
        api_version: DEVWORKSPACE_API_VERSION.to_string(),
        kind: DEVWORKSPACE_KIND.to_string(),
        metadata: DevWorkspaceMetadata {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        },
        spec: DevWorkspaceSpec::default(),
        status: None,
    }
}

#[async_trait]
impl DevWorkspaceClient for RecordingClient {
    async fn create(
        &self,
        devfile: Devfile,
        routing_class: &str,
        started: bool,
    ) -> Result<DevWorkspace> {
        self.record(RecordedCall::Create {
            devfile: devfile.clone(),
            routing_class: routing_class.to_string(),
            started,
        })?;

        let metadata = devfile.metadata.clone().unwrap_or_default();
        let mut workspace = sample_devworkspace(
            metadata.namespace.as_deref().unwrap_or_default(),
            metadata.name.as_deref().unwrap_or("recorded"),
        );
        workspace.spec.started = started;
        workspace.spec.routing_class = Some(routing_class.to_string());
        workspace.spec.template = devfile.template();
        Ok(workspace)
    }

    async fn patch(
        &self,
        namespace: &str,
        name: &str,
        operations: Vec<PatchOperation>,
    ) -> Result<DevWorkspace> {
        self.record(RecordedCall::Patch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            operations,
        })?;
        Ok(sample_devworkspace(namespace, name))
    }

    async fn list_in_namespace(&self, namespace: &str) -> Result<Vec<DevWorkspace>> {
        self.record(RecordedCall::List {
            namespace: namespace.to_string(),
        })?;
        Ok(self.listing.lock().expect("listing lock poisoned").clone())
    }

    async fn get_by_name(&self, namespace: &str, name: &str) -> Result<DevWorkspace> {
        self.record(RecordedCall::Get {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        Ok(sample_devworkspace(namespace, name))
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        self.record(RecordedCall::Delete {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

/// Factory handing out one shared [`RecordingClient`] and remembering the
/// credentials it was asked for.
#[derive(Clone, Default)]
pub struct RecordingClientFactory {
    client: RecordingClient,
    credentials: Arc<Mutex<Vec<Credentials>>>,
}

impl RecordingClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> &RecordingClient {
        &self.client
    }

    pub fn credentials(&self) -> Vec<Credentials> {
        self.credentials
            .lock()
            .expect("credentials lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ClientFactory for RecordingClientFactory {
    async fn client_for(&self, credentials: &Credentials) -> Result<Arc<dyn DevWorkspaceClient>> {
        self.credentials
            .lock()
            .expect("credentials lock poisoned")
            .push(credentials.clone());
        Ok(Arc::new(self.client.clone()))
    }
}
