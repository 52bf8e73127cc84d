//! Provider configuration
//!
//! Resolves the VisionOne connection settings from the provider block,
//! falling back to environment variables. A value set in the provider block
//! always wins over the environment.

use alicloudsecurity_common::{region_endpoint, CamConfig, EndpointType};

use crate::error::Diagnostic;
use crate::state::{get_set_string_attr, DynamicValue};

pub const API_KEY_ATTR: &str = "visionone_api_key";
pub const REGION_ATTR: &str = "visionone_region";
pub const ENDPOINT_ATTR: &str = "visionone_endpoint";
pub const ENDPOINT_TYPE_ATTR: &str = "visionone_endpoint_type";
pub const BUSINESS_ID_ATTR: &str = "visionone_business_id";

pub const API_KEY_ENV: &str = "VISIONONE_API_KEY";
pub const REGION_ENV: &str = "VISIONONE_REGION";
pub const ENDPOINT_ENV: &str = "VISIONONE_ENDPOINT";
pub const ENDPOINT_TYPE_ENV: &str = "VISIONONE_ENDPOINT_TYPE";
pub const BUSINESS_ID_ENV: &str = "VISIONONE_BUSINESS_ID";

/// Read a variable from the process environment
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn setting<F>(config: &DynamicValue, attr: &str, env_name: &str, env: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_set_string_attr(config, attr)
        .or_else(|| env(env_name))
        .unwrap_or_default()
}

fn missing(attr: &str, env_name: &str, label: &str) -> Diagnostic {
    Diagnostic::attribute_error(
        attr,
        format!("Missing VisionOne {}", label),
        format!(
            "The provider cannot create the VisionOne API client as there is a missing or empty value for the VisionOne {}. \
             Set the {} value in the configuration or use the {} environment variable. \
             If either is already set, ensure the value is not empty.",
            label.to_lowercase(),
            attr,
            env_name
        ),
    )
}

/// Build the client configuration, or every diagnostic explaining why not
pub fn resolve_cam_config<F>(config: &DynamicValue, env: F) -> Result<CamConfig, Vec<Diagnostic>>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = setting(config, API_KEY_ATTR, API_KEY_ENV, &env);
    let region = setting(config, REGION_ATTR, REGION_ENV, &env);
    let business_id = setting(config, BUSINESS_ID_ATTR, BUSINESS_ID_ENV, &env);
    let mut endpoint = setting(config, ENDPOINT_ATTR, ENDPOINT_ENV, &env);
    let mut endpoint_type = setting(config, ENDPOINT_TYPE_ATTR, ENDPOINT_TYPE_ENV, &env);

    let mut diagnostics = Vec::new();

    if api_key.is_empty() {
        diagnostics.push(missing(API_KEY_ATTR, API_KEY_ENV, "API Key"));
    }
    if region.is_empty() {
        diagnostics.push(missing(REGION_ATTR, REGION_ENV, "Region"));
    }
    if business_id.is_empty() {
        diagnostics.push(missing(BUSINESS_ID_ATTR, BUSINESS_ID_ENV, "Business ID"));
    }

    if endpoint.is_empty() && !region.is_empty() {
        match region_endpoint(&region) {
            Ok(url) => endpoint = url.to_string(),
            Err(e) => diagnostics.push(Diagnostic::attribute_error(
                REGION_ATTR,
                "Unsupported VisionOne Region",
                format!(
                    "{}. Use one of au, eu, in, jp, sg, uae, us or set {} explicitly.",
                    e, ENDPOINT_ATTR
                ),
            )),
        }
    }

    if endpoint_type.is_empty() {
        endpoint_type = EndpointType::default().to_string();
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    Ok(CamConfig::new(endpoint, endpoint_type, api_key, business_id, region))
}
