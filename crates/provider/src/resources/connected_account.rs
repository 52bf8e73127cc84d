//! Connected Account Resource handler for Terraform

use alicloudsecurity_common::{
    CamClient, ConnectedAccount, CreateConnectionRequest, UpdateConnectionRequest,
};
use tracing::{debug, info, warn};

use crate::error::{Diagnostic, ProviderError, Result};
use crate::state::{
    get_optional_string_attr, get_string_attr, make_state, optional_string_value, string_value,
    DynamicValue,
};
use super::Resource;

/// Attributes fixed at creation; changing them means a new connection
const IMMUTABLE_ATTRS: [&str; 4] = ["account_id", "role_arn", "oidc_provider_id", "parent_stack_region"];

pub struct ConnectedAccountResource;

#[async_trait::async_trait]
impl Resource for ConnectedAccountResource {
    fn type_name() -> &'static str {
        "alicloudsecurity_connected_account"
    }

    async fn create(client: &CamClient, config: &DynamicValue) -> Result<(DynamicValue, Vec<Diagnostic>)> {
        let request = CreateConnectionRequest {
            account_id: required_attr(config, "account_id")?,
            region: required_attr(config, "parent_stack_region")?,
            role_arn: required_attr(config, "role_arn")?,
            oidc_provider_id: required_attr(config, "oidc_provider_id")?,
            name: get_string_attr(config, "name"),
            description: get_optional_string_attr(config, "description"),
        };

        client
            .create_connection(&request)
            .await
            .map_err(ProviderError::api("create"))?;

        // The create call returns no body; read back the server-assigned fields
        let planned = || ConnectedAccount {
            id: request.account_id.clone(),
            ..Default::default()
        };
        let mut warnings = Vec::new();
        let account = match client.read_connection(&request.account_id).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                debug!(account_id = %request.account_id, "Created account not readable yet, keeping planned values");
                planned()
            }
            Err(e) => {
                warn!(account_id = %request.account_id, error = %e, "Read-back after create failed, keeping planned values");
                warnings.push(Diagnostic::warning(
                    "Read Error",
                    format!(
                        "Connected account {} was created but could not be read back: {}. \
                         Computed attributes will be filled in on the next refresh.",
                        request.account_id, e
                    ),
                ));
                planned()
            }
        };

        Ok((account_to_state(&account, config), warnings))
    }

    async fn read(client: &CamClient, state: &DynamicValue) -> Result<Option<DynamicValue>> {
        let account_id = required_attr(state, "account_id")?;

        let account = client
            .read_connection(&account_id)
            .await
            .map_err(ProviderError::api("read"))?;

        match account {
            Some(account) => Ok(Some(account_to_state(&account, state))),
            None => {
                info!(account_id = %account_id, "Connected account no longer exists, removing from state");
                Ok(None)
            }
        }
    }

    async fn update(client: &CamClient, state: &DynamicValue, config: &DynamicValue) -> Result<DynamicValue> {
        for attr in IMMUTABLE_ATTRS {
            if get_string_attr(state, attr) != get_string_attr(config, attr) {
                return Err(ProviderError::Immutable(attr));
            }
        }

        let account_id = required_attr(state, "account_id")?;
        let request = UpdateConnectionRequest {
            name: changed_attr(state, config, "name"),
            description: changed_attr(state, config, "description"),
        };

        if request.is_empty() {
            debug!(account_id = %account_id, "No descriptive changes, skipping update call");
        } else {
            client
                .update_connection(&account_id, &request)
                .await
                .map_err(ProviderError::api("update"))?;
        }

        let account = client
            .read_connection(&account_id)
            .await
            .map_err(ProviderError::api("read"))?
            .ok_or_else(|| ProviderError::NotFound(account_id.clone()))?;

        Ok(account_to_state(&account, config))
    }

    async fn delete(client: &CamClient, state: &DynamicValue) -> Result<()> {
        let account_id = required_attr(state, "account_id")?;

        match client.delete_connection(&account_id).await {
            Ok(()) => Ok(()),
            // Already gone is the desired end state
            Err(e) if e.status() == Some(404) => {
                info!(account_id = %account_id, "Connected account already deleted");
                Ok(())
            }
            Err(e) => Err(ProviderError::api("delete")(e)),
        }
    }

    fn import_state(id: &str) -> DynamicValue {
        make_state(vec![("account_id", string_value(id))])
    }
}

fn required_attr(value: &DynamicValue, key: &'static str) -> Result<String> {
    get_optional_string_attr(value, key).ok_or(ProviderError::MissingAttribute(key))
}

/// New value of a descriptive attribute when it differs from state.
///
/// Clearing an attribute sends the empty string.
fn changed_attr(state: &DynamicValue, config: &DynamicValue, key: &str) -> Option<String> {
    let old = get_string_attr(state, key);
    let new = get_string_attr(config, key);
    (old != new).then_some(new)
}

fn prefer(remote: &str, local: &DynamicValue, key: &str) -> String {
    if remote.is_empty() {
        get_string_attr(local, key)
    } else {
        remote.to_string()
    }
}

/// Map a remote record onto resource state, keeping local values for
/// fields the backend leaves empty
fn account_to_state(account: &ConnectedAccount, local: &DynamicValue) -> DynamicValue {
    let account_id = get_optional_string_attr(local, "account_id").unwrap_or_else(|| account.id.clone());

    make_state(vec![
        ("account_id", string_value(account_id)),
        ("role_arn", string_value(prefer(&account.role_arn, local, "role_arn"))),
        ("oidc_provider_id", string_value(prefer(&account.oidc_provider_id, local, "oidc_provider_id"))),
        ("parent_stack_region", string_value(prefer(&account.parent_stack_region, local, "parent_stack_region"))),
        ("name", optional_string_value(&prefer(&account.name, local, "name"))),
        ("description", optional_string_value(&prefer(&account.description, local, "description"))),
        ("state", string_value(&account.state)),
        ("created_date_time", string_value(&account.created_date_time)),
        ("updated_date_time", string_value(&account.updated_date_time)),
        ("last_synced_date_time", string_value(&account.last_synced_date_time)),
    ])
}
