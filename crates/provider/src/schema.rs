//! Provider, resource and data source schemas

use serde::Serialize;

use crate::error::Diagnostic;
use crate::state::DynamicValue;

/// How an attribute is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub description: &'static str,
    pub mode: AttributeMode,
    pub sensitive: bool,
}

const fn attr(name: &'static str, description: &'static str, mode: AttributeMode) -> Attribute {
    Attribute {
        name,
        description,
        mode,
        sensitive: false,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Report required attributes that are missing or null
    pub fn validate(&self, config: &DynamicValue) -> Vec<Diagnostic> {
        self.attributes
            .iter()
            .filter(|a| a.mode == AttributeMode::Required)
            .filter(|a| config.get(a.name).map_or(true, DynamicValue::is_null))
            .map(|a| {
                Diagnostic::attribute_error(
                    a.name,
                    "Missing required argument",
                    format!("The argument \"{}\" is required, but no definition was found.", a.name),
                )
            })
            .collect()
    }
}

pub fn provider_schema() -> Schema {
    use AttributeMode::Optional;

    Schema {
        description: "Interact with VisionOne AliCloud Security.",
        attributes: vec![
            Attribute {
                sensitive: true,
                ..attr(
                    "visionone_api_key",
                    "API key for VisionOne AliCloud Security. May also be provided via VISIONONE_API_KEY environment variable.",
                    Optional,
                )
            },
            attr(
                "visionone_region",
                "Region for VisionOne AliCloud Security. May also be provided via VISIONONE_REGION environment variable.",
                Optional,
            ),
            attr(
                "visionone_endpoint",
                "Base URL of the VisionOne API. Derived from the region when unset. May also be provided via VISIONONE_ENDPOINT environment variable.",
                Optional,
            ),
            attr(
                "visionone_endpoint_type",
                "Endpoint type, automation or express. Defaults to automation. May also be provided via VISIONONE_ENDPOINT_TYPE environment variable.",
                Optional,
            ),
            attr(
                "visionone_business_id",
                "VisionOne business (tenant) ID. May also be provided via VISIONONE_BUSINESS_ID environment variable.",
                Optional,
            ),
        ],
    }
}

pub fn connected_account_schema() -> Schema {
    use AttributeMode::{Computed, Optional, Required};

    Schema {
        description: "Manage a VisionOne connected account.",
        attributes: vec![
            attr("account_id", "The ID of the AliCloud Account.", Required),
            attr("role_arn", "The ARN of the role in AliCloud Account.", Required),
            attr("oidc_provider_id", "The ID of the OIDC provider in AliCloud Account.", Required),
            attr("parent_stack_region", "The region of the parent stack in VisionOne.", Required),
            attr("name", "The name of the connected account in VisionOne.", Optional),
            attr("description", "The description of the connected account in VisionOne.", Optional),
            attr("state", "The state of the connected account in VisionOne.", Computed),
            attr("created_date_time", "The creation time of the connected account in VisionOne.", Computed),
            attr("updated_date_time", "The last update time of the connected account in VisionOne.", Computed),
            attr("last_synced_date_time", "The last synchronization time of the connected account in VisionOne.", Computed),
        ],
    }
}

pub fn connected_account_data_source_schema() -> Schema {
    use AttributeMode::{Computed, Required};

    Schema {
        description: "Data source for connected account in VisionOne.",
        attributes: vec![
            attr("account_id", "The ID of the connected AliCloud Account.", Required),
            attr("role_arn", "The ARN of the role in AliCloud Account.", Computed),
            attr("oidc_provider_id", "The ID of the OIDC provider in AliCloud Account.", Computed),
            attr("name", "The name of the connected account in VisionOne.", Computed),
            attr("description", "The description of the connected account in VisionOne.", Computed),
            attr("connection_state", "The state of the connected account in VisionOne.", Computed),
            attr("created_date_time", "The creation time of the connected account in VisionOne.", Computed),
            attr("updated_date_time", "The last update time of the connected account in VisionOne.", Computed),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_required() {
        let config = DynamicValue::from(json!({
            "account_id": "a1",
            "role_arn": null,
            "parent_stack_region": "cn-hangzhou"
        }));

        let diags = connected_account_schema().validate(&config);
        let attrs: Vec<_> = diags.iter().filter_map(|d| d.attribute.as_deref()).collect();
        assert_eq!(attrs, vec!["role_arn", "oidc_provider_id"]);
    }

    #[test]
    fn test_api_key_is_sensitive() {
        let schema = provider_schema();
        assert!(schema.attribute("visionone_api_key").unwrap().sensitive);
        assert!(!schema.attribute("visionone_region").unwrap().sensitive);
    }
}
