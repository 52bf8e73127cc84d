//! Core types for the VisionOne connected account API

use serde::{Deserialize, Deserializer, Serialize};

/// A connected AliCloud account as reported by VisionOne.
///
/// Every field is a plain `String`: values that are missing or `null` in the
/// payload decode to the empty string, so a decoded record never carries
/// holes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectedAccount {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub role_arn: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub oidc_provider_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub parent_stack_region: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub created_date_time: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub updated_date_time: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_synced_date_time: String,
}

/// Body of a create call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectionRequest {
    pub account_id: String,
    pub region: String,
    pub role_arn: String,
    pub oidc_provider_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of an update call. Only the descriptive fields are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConnectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateConnectionRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
