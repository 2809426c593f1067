use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Timestamp layout shared by tables, log lines and detail views.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Reads an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Organization,
    Project,
}

impl ScopeKind {
    /// Value of the `x-sanity-scope-type` header.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Project => "project",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    pub id: String,
    pub label: String,
}

impl Scope {
    pub fn organization(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Organization,
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn project(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Project,
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blueprint_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    pub stack_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blueprint_id: String,
    pub status: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters and provider metadata are free-form JSON objects.
pub type JsonMap = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub stack_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operation_id: String,
    #[serde(default)]
    pub blueprint_id: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: JsonMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider_metadata: JsonMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// An empty `externalId` is treated the same as a missing one.
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub blueprint_id: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOperationsOpts {
    pub status: Option<String>,
    pub limit: Option<u32>,
}

impl ListOperationsOpts {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref status) = self.status {
            params.push(("status", status.clone()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLogsOpts {
    pub stack_id: Option<String>,
    pub operation_id: Option<String>,
    pub resource_id: Option<String>,
    pub blueprint_id: Option<String>,
    pub limit: Option<u32>,
}

impl ListLogsOpts {
    pub fn for_stack(stack_id: &str) -> Self {
        Self {
            stack_id: Some(stack_id.to_string()),
            ..Self::default()
        }
    }

    pub fn for_operation(operation_id: &str) -> Self {
        Self {
            operation_id: Some(operation_id.to_string()),
            ..Self::default()
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let ids = [
            ("stackId", &self.stack_id),
            ("operationId", &self.operation_id),
            ("resourceId", &self.resource_id),
            ("blueprintId", &self.blueprint_id),
        ];
        let mut params: Vec<(&'static str, String)> = ids
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect();
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Error body returned by the API on non-200 responses. Only the message is
/// surfaced; `statusCode` and `error` repeat what the status line says.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
