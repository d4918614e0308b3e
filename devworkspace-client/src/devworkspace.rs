use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const DEVWORKSPACE_API_VERSION: &str = "workspace.devfile.io/v1alpha2";
pub const DEVWORKSPACE_KIND: &str = "DevWorkspace";

/// Devfile keys that describe the document itself rather than the workspace
/// template, and are therefore not copied into `spec.template`.
const NON_TEMPLATE_KEYS: &[&str] = &["schemaVersion"];

/// Metadata block of a submitted devfile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,

    // The gateway always overwrites this, so a non-string value is dropped
    // instead of failing the request.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Workspace descriptor submitted by the caller.
///
/// Everything besides `metadata` is kept verbatim in `content` and
/// forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Devfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DevfileMetadata>,

    #[serde(flatten)]
    pub content: BTreeMap<String, Value>,
}

impl Devfile {
    /// Metadata block, created empty when the devfile has none.
    pub fn metadata_mut(&mut self) -> &mut DevfileMetadata {
        self.metadata.get_or_insert_with(DevfileMetadata::default)
    }

    /// Pin the devfile to `namespace`, replacing whatever namespace it carried.
    pub fn scope_to_namespace(&mut self, namespace: &str) {
        self.metadata_mut().namespace = Some(namespace.to_string());
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.namespace.as_deref())
    }

    /// Devfile content that makes up the DevWorkspace template.
    pub fn template(&self) -> BTreeMap<String, Value> {
        self.content
            .iter()
            .filter(|(key, _)| !NON_TEMPLATE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevWorkspaceMetadata {
    pub name: String,
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevWorkspaceSpec {
    #[serde(default)]
    pub started: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_class: Option<String>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub template: BTreeMap<String, Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A DevWorkspace custom resource as returned by the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevWorkspace {
    pub api_version: String,
    pub kind: String,
    pub metadata: DevWorkspaceMetadata,
    pub spec: DevWorkspaceSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub status: Option<Value>,
}

impl DevWorkspace {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

/// One JSON Patch (RFC 6902) entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,

    // An explicit `"value": null` stays `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Object)]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    pub fn new(op: PatchOp, path: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            op,
            path: path.into(),
            value,
            from: None,
        }
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}
