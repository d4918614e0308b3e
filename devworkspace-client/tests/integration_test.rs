//! Integration tests for the in-memory DevWorkspace client
//!
//! Covers creation, patching, listing, lookup and deletion through the
//! `DevWorkspaceClient` trait, plus the client factory.

use devworkspace_client::{
    ClientError, ClientFactory, Credentials, DevWorkspaceClient, Devfile, InMemoryClient,
    InMemoryClientFactory, PatchOp, PatchOperation,
};
use serde_json::json;

fn devfile(namespace: &str, name: &str) -> Devfile {
    serde_json::from_value(json!({
        "schemaVersion": "2.1.0",
        "metadata": { "name": name, "namespace": namespace },
        "components": [{
            "name": "tools",
            "container": { "image": "quay.io/devfile/universal-developer-image" }
        }]
    }))
    .expect("valid devfile")
}

#[tokio::test]
async fn test_create_devworkspace() {
    let client = InMemoryClient::new();

    let workspace = client
        .create(devfile("team-a", "wksp"), "che", true)
        .await
        .expect("Failed to create DevWorkspace");

    assert_eq!(workspace.api_version, "workspace.devfile.io/v1alpha2");
    assert_eq!(workspace.kind, "DevWorkspace");
    assert_eq!(workspace.name(), "wksp");
    assert_eq!(workspace.namespace(), "team-a");
    assert!(workspace.spec.started);
    assert_eq!(workspace.spec.routing_class.as_deref(), Some("che"));
    assert!(workspace.spec.template.contains_key("components"));
    assert!(!workspace.spec.template.contains_key("schemaVersion"));
    assert!(workspace.metadata.uid.is_some());
    assert!(workspace.metadata.creation_timestamp.is_some());
}

#[tokio::test]
async fn test_create_with_generate_name() {
    let client = InMemoryClient::new();
    let devfile: Devfile = serde_json::from_value(json!({
        "metadata": { "generateName": "nodejs-", "namespace": "team-a" }
    }))
    .unwrap();

    let workspace = client.create(devfile, "che", false).await.unwrap();

    assert!(workspace.name().starts_with("nodejs-"));
    assert_eq!(workspace.name().len(), "nodejs-".len() + 5);
}

#[tokio::test]
async fn test_create_requires_name_and_namespace() {
    let client = InMemoryClient::new();

    let no_name: Devfile =
        serde_json::from_value(json!({ "metadata": { "namespace": "team-a" } })).unwrap();
    assert!(matches!(
        client.create(no_name, "che", false).await,
        Err(ClientError::Invalid(_))
    ));

    let no_namespace: Devfile =
        serde_json::from_value(json!({ "metadata": { "name": "wksp" } })).unwrap();
    assert!(matches!(
        client.create(no_namespace, "che", false).await,
        Err(ClientError::Invalid(_))
    ));
}

#[tokio::test]
async fn test_create_duplicate_conflicts() {
    let client = InMemoryClient::new();
    client
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();

    let result = client.create(devfile("team-a", "wksp"), "che", false).await;
    assert!(matches!(result, Err(ClientError::AlreadyExists { .. })));

    // Same name in another namespace is a different resource
    client
        .create(devfile("team-b", "wksp"), "che", false)
        .await
        .unwrap();
    assert_eq!(client.len().await, 2);
}

#[tokio::test]
async fn test_list_is_scoped_to_namespace() {
    let client = InMemoryClient::new();
    for (namespace, name) in [("team-a", "b"), ("team-b", "x"), ("team-a", "a")] {
        client
            .create(devfile(namespace, name), "che", false)
            .await
            .unwrap();
    }

    let workspaces = client.list_in_namespace("team-a").await.unwrap();
    let names: Vec<&str> = workspaces.iter().map(|w| w.name()).collect();
    assert_eq!(names, vec!["a", "b"]);

    assert!(client.list_in_namespace("team-c").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_patch_devworkspace() {
    let client = InMemoryClient::new();
    let created = client
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();

    let patched = client
        .patch(
            "team-a",
            "wksp",
            vec![
                PatchOperation::new(PatchOp::Replace, "/spec/started", Some(json!(true))),
                PatchOperation::new(
                    PatchOp::Add,
                    "/metadata/annotations",
                    Some(json!({ "che.eclipse.org/last-updated": "now" })),
                ),
            ],
        )
        .await
        .expect("Failed to patch DevWorkspace");

    assert!(patched.spec.started);
    assert_eq!(
        patched.metadata.annotations.get("che.eclipse.org/last-updated"),
        Some(&"now".to_string())
    );
    assert_ne!(
        patched.metadata.resource_version,
        created.metadata.resource_version
    );

    let fetched = client.get_by_name("team-a", "wksp").await.unwrap();
    assert_eq!(fetched, patched);
}

#[tokio::test]
async fn test_failed_patch_leaves_resource_unchanged() {
    let client = InMemoryClient::new();
    let created = client
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();

    let result = client
        .patch(
            "team-a",
            "wksp",
            vec![
                PatchOperation::new(PatchOp::Replace, "/spec/started", Some(json!(true))),
                PatchOperation::new(PatchOp::Remove, "/spec/missing", None),
            ],
        )
        .await;
    assert!(matches!(result, Err(ClientError::Invalid(_))));

    let renamed = client
        .patch(
            "team-a",
            "wksp",
            vec![PatchOperation::new(
                PatchOp::Replace,
                "/metadata/name",
                Some(json!("other")),
            )],
        )
        .await;
    assert!(matches!(renamed, Err(ClientError::Invalid(_))));

    let fetched = client.get_by_name("team-a", "wksp").await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_patch_rejects_malformed_operations() {
    let client = InMemoryClient::new();
    let created = client
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();

    // Array indices with leading zeros are not valid JSON Pointer tokens.
    let leading_zero = client
        .patch(
            "team-a",
            "wksp",
            vec![PatchOperation::new(
                PatchOp::Remove,
                "/spec/template/components/00",
                None,
            )],
        )
        .await;
    assert!(matches!(leading_zero, Err(ClientError::Invalid(_))));

    let missing_value = client
        .patch(
            "team-a",
            "wksp",
            vec![PatchOperation::new(PatchOp::Add, "/spec/template/attributes", None)],
        )
        .await;
    assert!(matches!(missing_value, Err(ClientError::Invalid(_))));

    let failed_test = client
        .patch(
            "team-a",
            "wksp",
            vec![
                PatchOperation::new(PatchOp::Test, "/spec/started", Some(json!(true))),
                PatchOperation::new(PatchOp::Replace, "/spec/started", Some(json!(false))),
            ],
        )
        .await;
    match failed_test {
        Err(ClientError::Invalid(message)) => assert!(message.contains("test failed")),
        other => panic!("expected a failed test operation, got {:?}", other),
    }

    let fetched = client.get_by_name("team-a", "wksp").await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_patch_move_and_copy() {
    let client = InMemoryClient::new();
    client
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();

    let patched = client
        .patch(
            "team-a",
            "wksp",
            vec![
                PatchOperation {
                    from: Some("/spec/template/components/0".to_string()),
                    ..PatchOperation::new(PatchOp::Copy, "/spec/template/components/-", None)
                },
                PatchOperation {
                    from: Some("/spec/template/components".to_string()),
                    ..PatchOperation::new(PatchOp::Move, "/spec/template/tools", None)
                },
            ],
        )
        .await
        .expect("Failed to apply move and copy");

    assert!(!patched.spec.template.contains_key("components"));
    let tools = patched.spec.template["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0], tools[1]);
}

#[tokio::test]
async fn test_missing_devworkspace_is_not_found() {
    let client = InMemoryClient::new();

    assert!(matches!(
        client.get_by_name("team-a", "missing").await,
        Err(ClientError::NotFound { .. })
    ));
    assert!(matches!(
        client.patch("team-a", "missing", vec![]).await,
        Err(ClientError::NotFound { .. })
    ));
    assert!(matches!(
        client.delete("team-a", "missing").await,
        Err(ClientError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_devworkspace() {
    let client = InMemoryClient::new();
    client
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();

    client.delete("team-a", "wksp").await.unwrap();

    assert!(client.is_empty().await);
    assert!(client.get_by_name("team-a", "wksp").await.is_err());
}

#[tokio::test]
async fn test_factory_shares_store_and_rejects_empty_token() {
    let factory = InMemoryClientFactory::new();

    let alice = factory
        .client_for(&Credentials::bearer("alice-token"))
        .await
        .unwrap();
    let bob = factory
        .client_for(&Credentials::bearer("bob-token"))
        .await
        .unwrap();

    alice
        .create(devfile("team-a", "wksp"), "che", false)
        .await
        .unwrap();
    assert_eq!(bob.list_in_namespace("team-a").await.unwrap().len(), 1);

    let result = factory.client_for(&Credentials::bearer("  ")).await;
    assert!(matches!(result, Err(ClientError::Unauthorized(_))));
}

#[test]
fn test_credentials_debug_redacts_token() {
    let credentials = Credentials::bearer("secret-token");
    let rendered = format!("{:?}", credentials);
    assert!(!rendered.contains("secret-token"));
}
