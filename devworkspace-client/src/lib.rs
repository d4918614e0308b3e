//! DevWorkspace resource client contract
//!
//! This crate defines the DevWorkspace resource model, the asynchronous
//! client trait the HTTP gateway forwards requests to, and the per-request
//! client factory. It also ships an in-memory client used for local
//! development and tests.

pub mod client;
pub mod devworkspace;
pub mod error;
pub mod memory;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use client::{ClientFactory, Credentials, DevWorkspaceClient};
pub use devworkspace::{
    DevWorkspace, DevWorkspaceMetadata, DevWorkspaceSpec, Devfile, DevfileMetadata, PatchOp,
    PatchOperation, DEVWORKSPACE_API_VERSION, DEVWORKSPACE_KIND,
};
pub use error::{ClientError, Result};
pub use memory::{InMemoryClient, InMemoryClientFactory};
