use crate::routes::devworkspaces::CreateDevWorkspaceRequest;
use devworkspace_client::{
    DevWorkspace, DevWorkspaceMetadata, DevWorkspaceSpec, Devfile, DevfileMetadata, PatchOp,
    PatchOperation,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::health::readiness_check,
        crate::routes::devworkspaces::create_devworkspace,
        crate::routes::devworkspaces::patch_devworkspace,
        crate::routes::devworkspaces::list_devworkspaces,
        crate::routes::devworkspaces::get_devworkspace,
        crate::routes::devworkspaces::delete_devworkspace,
    ),
    components(
        schemas(
            DevWorkspace,
            DevWorkspaceMetadata,
            DevWorkspaceSpec,
            Devfile,
            DevfileMetadata,
            PatchOp,
            PatchOperation,
            CreateDevWorkspaceRequest
        )
    ),
    tags(
        (name = "devworkspace", description = "DevWorkspace custom resources"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the DevWorkspace routes served under `base_api_path`.
pub fn openapi(base_api_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let (health, api): (Vec<_>, Vec<_>) = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .partition(|(path, _)| path.starts_with("/health"));

    doc.paths.paths = health
        .into_iter()
        .chain(
            api.into_iter()
                .map(|(path, item)| (format!("{}{}", base_api_path, path), item)),
        )
        .collect();
    doc
}
