use crate::{
    auth::DevWorkspaceApi,
    error::ApiResult,
    state::AppState,
    validation::{NamespacedParams, NamespacedWorkspaceParams},
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use devworkspace_client::{DevWorkspace, Devfile, PatchOperation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/namespace/{namespace}/devworkspaces",
            get(list_devworkspaces).post(create_devworkspace),
        )
        .route(
            "/namespace/{namespace}/devworkspaces/{workspaceName}",
            get(get_devworkspace)
                .patch(patch_devworkspace)
                .delete(delete_devworkspace),
        )
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDevWorkspaceRequest {
    pub devfile: Devfile,
    pub started: bool,
}

#[utoipa::path(
    post,
    path = "/namespace/{namespace}/devworkspaces",
    tag = "devworkspace",
    params(NamespacedParams),
    request_body = CreateDevWorkspaceRequest,
    responses(
        (status = 200, description = "DevWorkspace created", body = DevWorkspace),
        (status = 401, description = "Missing credentials"),
        (status = 409, description = "DevWorkspace already exists"),
        (status = 422, description = "DevWorkspace rejected by the cluster")
    )
)]
pub async fn create_devworkspace(
    State(state): State<AppState>,
    DevWorkspaceApi(client): DevWorkspaceApi,
    NamespacedParams { namespace }: NamespacedParams,
    Json(req): Json<CreateDevWorkspaceRequest>,
) -> ApiResult<Json<DevWorkspace>> {
    let CreateDevWorkspaceRequest {
        mut devfile,
        started,
    } = req;

    // The namespace from the path always wins over the devfile's own
    devfile.scope_to_namespace(&namespace);

    debug!(
        "Creating DevWorkspace in {} (started: {}, routing class: {})",
        namespace, started, state.routing_class
    );
    let workspace = client
        .create(devfile, &state.routing_class, started)
        .await?;

    Ok(Json(workspace))
}

#[utoipa::path(
    patch,
    path = "/namespace/{namespace}/devworkspaces/{workspaceName}",
    tag = "devworkspace",
    params(NamespacedWorkspaceParams),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 200, description = "DevWorkspace patched", body = DevWorkspace),
        (status = 404, description = "DevWorkspace not found"),
        (status = 422, description = "Patch could not be applied")
    )
)]
pub async fn patch_devworkspace(
    DevWorkspaceApi(client): DevWorkspaceApi,
    NamespacedWorkspaceParams {
        namespace,
        workspace_name,
    }: NamespacedWorkspaceParams,
    Json(operations): Json<Vec<PatchOperation>>,
) -> ApiResult<Json<DevWorkspace>> {
    debug!(
        "Patching DevWorkspace {}/{} with {} operation(s)",
        namespace,
        workspace_name,
        operations.len()
    );
    let workspace = client
        .patch(&namespace, &workspace_name, operations)
        .await?;

    Ok(Json(workspace))
}

#[utoipa::path(
    get,
    path = "/namespace/{namespace}/devworkspaces",
    tag = "devworkspace",
    params(NamespacedParams),
    responses(
        (status = 200, description = "DevWorkspaces in the namespace", body = Vec<DevWorkspace>),
        (status = 401, description = "Missing credentials")
    )
)]
pub async fn list_devworkspaces(
    DevWorkspaceApi(client): DevWorkspaceApi,
    NamespacedParams { namespace }: NamespacedParams,
) -> ApiResult<Json<Vec<DevWorkspace>>> {
    debug!("Listing DevWorkspaces in {}", namespace);
    let workspaces = client.list_in_namespace(&namespace).await?;

    Ok(Json(workspaces))
}

#[utoipa::path(
    get,
    path = "/namespace/{namespace}/devworkspaces/{workspaceName}",
    tag = "devworkspace",
    params(NamespacedWorkspaceParams),
    responses(
        (status = 200, description = "The DevWorkspace", body = DevWorkspace),
        (status = 404, description = "DevWorkspace not found")
    )
)]
pub async fn get_devworkspace(
    DevWorkspaceApi(client): DevWorkspaceApi,
    NamespacedWorkspaceParams {
        namespace,
        workspace_name,
    }: NamespacedWorkspaceParams,
) -> ApiResult<Json<DevWorkspace>> {
    let workspace = client.get_by_name(&namespace, &workspace_name).await?;

    Ok(Json(workspace))
}

#[utoipa::path(
    delete,
    path = "/namespace/{namespace}/devworkspaces/{workspaceName}",
    tag = "devworkspace",
    params(NamespacedWorkspaceParams),
    responses(
        (status = 204, description = "The server has successfully fulfilled the request"),
        (status = 404, description = "DevWorkspace not found")
    )
)]
pub async fn delete_devworkspace(
    DevWorkspaceApi(client): DevWorkspaceApi,
    NamespacedWorkspaceParams {
        namespace,
        workspace_name,
    }: NamespacedWorkspaceParams,
) -> ApiResult<StatusCode> {
    debug!("Deleting DevWorkspace {}/{}", namespace, workspace_name);
    client.delete(&namespace, &workspace_name).await?;

    // Success is always an empty 204, never the client's payload
    Ok(StatusCode::NO_CONTENT)
}
