//! AliCloud Security Terraform Provider Implementation
//!
//! Dispatches provider lifecycle calls to the resource and data source
//! handlers. The CAM client is built once in `configure_provider` and shared
//! with every handler call.

use std::collections::HashMap;
use std::sync::Arc;

use alicloudsecurity_common::CamClient;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::config::{process_env, resolve_cam_config};
use crate::data_sources::{connected_account::ConnectedAccountDataSource, DataSource};
use crate::error::{has_error, Diagnostic, ProviderError};
use crate::resources::{connected_account::ConnectedAccountResource, Resource};
use crate::schema::{self, Schema};
use crate::state::DynamicValue;

/// Provider type name used as the prefix of every resource type
pub const PROVIDER_TYPE_NAME: &str = "alicloudsecurity";

#[derive(Debug)]
pub struct GetProviderSchemaResponse {
    pub provider: Schema,
    pub resource_schemas: HashMap<String, Schema>,
    pub data_source_schemas: HashMap<String, Schema>,
}

#[derive(Debug, Default)]
pub struct ReadResourceResponse {
    /// `None` when the resource no longer exists
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct ApplyResourceChangeResponse {
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}

#[derive(Debug, Default)]
pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct ReadDataSourceResponse {
    pub state: Option<DynamicValue>,
    pub diagnostics: Vec<Diagnostic>,
}

/// AliCloud Security Terraform Provider
pub struct AliCloudSecurityProvider {
    /// Provider version, "dev" for local builds
    version: String,
    /// Shared CAM client, set by `configure_provider`
    client: RwLock<Option<Arc<CamClient>>>,
}

impl AliCloudSecurityProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            client: RwLock::new(None),
        }
    }

    /// Provider with an already constructed client
    pub fn with_client(version: impl Into<String>, client: Arc<CamClient>) -> Self {
        Self {
            version: version.into(),
            client: RwLock::new(Some(client)),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    async fn client(&self) -> Result<Arc<CamClient>, ProviderError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(ProviderError::NotConfigured)
    }

    pub fn get_provider_schema(&self) -> GetProviderSchemaResponse {
        debug!("GetProviderSchema called");

        GetProviderSchemaResponse {
            provider: schema::provider_schema(),
            resource_schemas: vec![(
                ConnectedAccountResource::type_name().to_string(),
                schema::connected_account_schema(),
            )]
            .into_iter()
            .collect(),
            data_source_schemas: vec![(
                ConnectedAccountDataSource::type_name().to_string(),
                schema::connected_account_data_source_schema(),
            )]
            .into_iter()
            .collect(),
        }
    }

    pub fn validate_resource_config(&self, type_name: &str, config: &DynamicValue) -> Vec<Diagnostic> {
        debug!("ValidateResourceConfig called for {}", type_name);

        match type_name {
            t if t == ConnectedAccountResource::type_name() => {
                schema::connected_account_schema().validate(config)
            }
            _ => vec![ProviderError::UnknownType(type_name.to_string()).into()],
        }
    }

    /// Configure from the provider block and the process environment
    pub async fn configure_provider(&self, config: &DynamicValue) -> Vec<Diagnostic> {
        self.configure_with_env(config, process_env).await
    }

    pub async fn configure_with_env<F>(&self, config: &DynamicValue, env: F) -> Vec<Diagnostic>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Configuring VisionOne AliCloud Security client");

        let cam_config = match resolve_cam_config(config, env) {
            Ok(cam_config) => cam_config,
            Err(diagnostics) => return diagnostics,
        };

        debug!(
            endpoint = %cam_config.endpoint,
            endpoint_type = %cam_config.endpoint_type,
            region = %cam_config.region,
            "Creating VisionOne API client"
        );

        match CamClient::new(cam_config) {
            Ok(client) => {
                *self.client.write().await = Some(Arc::new(client));
                info!(success = true, "Configured VisionOne API client");
                vec![]
            }
            Err(e) => {
                error!("Failed to create VisionOne API client: {}", e);
                vec![Diagnostic::error(
                    "Unable to create VisionOne API client",
                    format!("Unable to create VisionOne API client: {}", e),
                )]
            }
        }
    }

    pub async fn read_resource(&self, type_name: &str, current_state: &DynamicValue) -> ReadResourceResponse {
        info!("ReadResource called for {}", type_name);

        let result: Result<Option<DynamicValue>, ProviderError> = async {
            let client = self.client().await?;
            match type_name {
                t if t == ConnectedAccountResource::type_name() => {
                    ConnectedAccountResource::read(&client, current_state).await
                }
                _ => Err(ProviderError::UnknownType(type_name.to_string())),
            }
        }
        .await;

        match result {
            Ok(new_state) => ReadResourceResponse {
                new_state,
                diagnostics: vec![],
            },
            Err(e) => ReadResourceResponse {
                // Keep the current state; the failure is reported, not treated as deletion
                new_state: Some(current_state.clone()),
                diagnostics: vec![e.into()],
            },
        }
    }

    pub async fn apply_resource_change(
        &self,
        type_name: &str,
        prior_state: Option<&DynamicValue>,
        planned_state: Option<&DynamicValue>,
    ) -> ApplyResourceChangeResponse {
        info!("ApplyResourceChange called for {}", type_name);

        if type_name != ConnectedAccountResource::type_name() {
            return ApplyResourceChangeResponse {
                new_state: None,
                diagnostics: vec![ProviderError::UnknownType(type_name.to_string()).into()],
            };
        }

        let client = match self.client().await {
            Ok(client) => client,
            Err(e) => {
                return ApplyResourceChangeResponse {
                    new_state: prior_state.cloned(),
                    diagnostics: vec![e.into()],
                }
            }
        };

        let prior = prior_state.filter(|s| !s.is_null());
        let planned = planned_state.filter(|s| !s.is_null());

        let result = match (prior, planned) {
            // Create
            (None, Some(planned)) => {
                let diagnostics = schema::connected_account_schema().validate(planned);
                if has_error(&diagnostics) {
                    return ApplyResourceChangeResponse {
                        new_state: None,
                        diagnostics,
                    };
                }
                ConnectedAccountResource::create(&client, planned).await
            }
            // Delete
            (Some(prior), None) => ConnectedAccountResource::delete(&client, prior)
                .await
                .map(|_| (DynamicValue::Null, vec![])),
            // Update
            (Some(prior), Some(planned)) => ConnectedAccountResource::update(&client, prior, planned)
                .await
                .map(|state| (state, vec![])),
            // No change
            (None, None) => Ok((DynamicValue::Null, vec![])),
        };

        match result {
            Ok((new_state, diagnostics)) => ApplyResourceChangeResponse {
                new_state: Some(new_state),
                diagnostics,
            },
            Err(e) => {
                error!("Failed to apply resource change: {}", e);
                ApplyResourceChangeResponse {
                    new_state: prior_state.cloned(),
                    diagnostics: vec![e.into()],
                }
            }
        }
    }

    pub async fn import_resource_state(&self, type_name: &str, id: &str) -> ImportResourceStateResponse {
        info!("ImportResourceState called for {} with ID {}", type_name, id);

        let result: Result<DynamicValue, ProviderError> = async {
            let client = self.client().await?;
            match type_name {
                t if t == ConnectedAccountResource::type_name() => {
                    let initial_state = ConnectedAccountResource::import_state(id);
                    ConnectedAccountResource::read(&client, &initial_state)
                        .await?
                        .ok_or_else(|| ProviderError::NotFound(id.to_string()))
                }
                _ => Err(ProviderError::UnknownType(type_name.to_string())),
            }
        }
        .await;

        match result {
            Ok(state) => ImportResourceStateResponse {
                imported_resources: vec![ImportedResource {
                    type_name: type_name.to_string(),
                    state,
                }],
                diagnostics: vec![],
            },
            Err(e) => ImportResourceStateResponse {
                imported_resources: vec![],
                diagnostics: vec![e.into()],
            },
        }
    }

    pub async fn read_data_source(&self, type_name: &str, config: &DynamicValue) -> ReadDataSourceResponse {
        info!("ReadDataSource called for {}", type_name);

        let result: Result<DynamicValue, ProviderError> = async {
            let client = self.client().await?;
            match type_name {
                t if t == ConnectedAccountDataSource::type_name() => {
                    ConnectedAccountDataSource::read(&client, config).await
                }
                _ => Err(ProviderError::UnknownType(type_name.to_string())),
            }
        }
        .await;

        match result {
            Ok(state) => ReadDataSourceResponse {
                state: Some(state),
                diagnostics: vec![],
            },
            Err(e) => ReadDataSourceResponse {
                state: None,
                diagnostics: vec![e.into()],
            },
        }
    }
}
