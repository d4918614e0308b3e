//! Path parameter extraction and validation
//!
//! Namespaces must be RFC 1123 labels and DevWorkspace names RFC 1123
//! subdomains, the same rules the cluster applies to the resources.

use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::IntoParams;

const MAX_LABEL_LEN: usize = 63;
const MAX_SUBDOMAIN_LEN: usize = 253;

static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid label regex"));

static SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid subdomain regex")
});

pub fn validate_namespace(namespace: &str) -> Result<(), ApiError> {
    if namespace.len() > MAX_LABEL_LEN || !LABEL.is_match(namespace) {
        return Err(ApiError::BadRequest(format!(
            "Invalid namespace {:?}: must be a lowercase RFC 1123 label of at most {} characters",
            namespace, MAX_LABEL_LEN
        )));
    }
    Ok(())
}

pub fn validate_workspace_name(name: &str) -> Result<(), ApiError> {
    if name.len() > MAX_SUBDOMAIN_LEN || !SUBDOMAIN.is_match(name) {
        return Err(ApiError::BadRequest(format!(
            "Invalid workspace name {:?}: must be a lowercase RFC 1123 subdomain \
             of at most {} characters",
            name, MAX_SUBDOMAIN_LEN
        )));
    }
    Ok(())
}

async fn path_params<T, S>(parts: &mut Parts, state: &S) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned + Send,
    S: Send + Sync,
{
    Path::<T>::from_request_parts(parts, state)
        .await
        .map(|Path(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// `{namespace}` path parameter.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct NamespacedParams {
    /// Kubernetes namespace the DevWorkspaces live in
    pub namespace: String,
}

impl<S> FromRequestParts<S> for NamespacedParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: NamespacedParams = path_params(parts, state).await?;
        validate_namespace(&params.namespace)?;
        Ok(params)
    }
}

/// `{namespace}` and `{workspaceName}` path parameters.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Path)]
pub struct NamespacedWorkspaceParams {
    /// Kubernetes namespace the DevWorkspace lives in
    pub namespace: String,
    /// Name of the DevWorkspace
    pub workspace_name: String,
}

impl<S> FromRequestParts<S> for NamespacedWorkspaceParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: NamespacedWorkspaceParams = path_params(parts, state).await?;
        validate_namespace(&params.namespace)?;
        validate_workspace_name(&params.workspace_name)?;
        Ok(params)
    }
}
