//! CAM client configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CamError, Result};

/// URL path convention exposed by a VisionOne deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    /// Public automation API, paths under `/v3.0/cam`
    Automation,
    /// Console backend, paths under `/public/cam/api/ui`
    Express,
}

impl Default for EndpointType {
    fn default() -> Self {
        Self::Automation
    }
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Automation => "automation",
            EndpointType::Express => "express",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointType {
    type Err = CamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "automation" => Ok(EndpointType::Automation),
            "express" => Ok(EndpointType::Express),
            "" => Err(CamError::Configuration(
                "endpoint type must not be empty".to_string(),
            )),
            other => Err(CamError::Configuration(format!(
                "unsupported endpoint type: {} (expected automation or express)",
                other
            ))),
        }
    }
}

/// VisionOne regional API hosts
const REGION_ENDPOINTS: &[(&str, &str)] = &[
    ("au", "https://api.au.xdr.trendmicro.com"),
    ("eu", "https://api.eu.xdr.trendmicro.com"),
    ("in", "https://api.in.xdr.trendmicro.com"),
    ("jp", "https://api.xdr.trendmicro.co.jp"),
    ("sg", "https://api.sg.xdr.trendmicro.com"),
    ("uae", "https://api.mea.xdr.trendmicro.com"),
    ("us", "https://api.xdr.trendmicro.com"),
];

/// Base URL of the VisionOne API for a region code
pub fn region_endpoint(region: &str) -> Result<&'static str> {
    REGION_ENDPOINTS
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, url)| *url)
        .ok_or_else(|| CamError::Configuration(format!("unsupported region: {}", region)))
}

/// Connection settings for the CAM backend.
///
/// Every field is required. `endpoint_type` stays a string here so that a
/// value read from the environment is only interpreted when the client is
/// built.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CamConfig {
    /// Base URL of the deployment, e.g. `https://api.xdr.trendmicro.com`
    pub endpoint: String,

    /// `automation` or `express`
    pub endpoint_type: String,

    /// Bearer token
    pub api_key: String,

    /// Tenant identifier sent as `x-customer-id`
    pub business_id: String,

    /// VisionOne region code
    pub region: String,
}

impl fmt::Debug for CamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CamConfig")
            .field("endpoint", &self.endpoint)
            .field("endpoint_type", &self.endpoint_type)
            .field("api_key", &"<redacted>")
            .field("business_id", &self.business_id)
            .field("region", &self.region)
            .finish()
    }
}

impl CamConfig {
    pub fn new(
        endpoint: impl Into<String>,
        endpoint_type: impl Into<String>,
        api_key: impl Into<String>,
        business_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            endpoint_type: endpoint_type.into(),
            api_key: api_key.into(),
            business_id: business_id.into(),
            region: region.into(),
        }
    }

    /// Check that every setting is present and return the parsed endpoint type
    pub fn validate(&self) -> Result<EndpointType> {
        let required = [
            ("endpoint", &self.endpoint),
            ("endpoint_type", &self.endpoint_type),
            ("api_key", &self.api_key),
            ("business_id", &self.business_id),
            ("region", &self.region),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CamError::Configuration(format!("{} must not be empty", field)));
            }
        }
        self.endpoint_type.parse()
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}
