//! Connected Account data source

use alicloudsecurity_common::{CamClient, ConnectedAccount};

use crate::error::{ProviderError, Result};
use crate::state::{get_optional_string_attr, make_state, string_value, DynamicValue};
use super::DataSource;

pub struct ConnectedAccountDataSource;

#[async_trait::async_trait]
impl DataSource for ConnectedAccountDataSource {
    fn type_name() -> &'static str {
        "alicloudsecurity_connected_account"
    }

    async fn read(client: &CamClient, config: &DynamicValue) -> Result<DynamicValue> {
        let account_id =
            get_optional_string_attr(config, "account_id").ok_or(ProviderError::MissingAccountId)?;

        let account = client
            .read_connection(&account_id)
            .await
            .map_err(ProviderError::api("read"))?
            .ok_or_else(|| ProviderError::NotFound(account_id.clone()))?;

        Ok(account_to_data(&account, &account_id))
    }
}

fn account_to_data(account: &ConnectedAccount, requested_id: &str) -> DynamicValue {
    let account_id = if account.id.is_empty() { requested_id } else { account.id.as_str() };

    make_state(vec![
        ("account_id", string_value(account_id)),
        ("role_arn", string_value(&account.role_arn)),
        ("oidc_provider_id", string_value(&account.oidc_provider_id)),
        ("name", string_value(&account.name)),
        ("description", string_value(&account.description)),
        ("connection_state", string_value(&account.state)),
        ("created_date_time", string_value(&account.created_date_time)),
        ("updated_date_time", string_value(&account.updated_date_time)),
    ])
}
