//! Connected Account Commands

use alicloudsecurity_common::{
    CamClient, ConnectedAccount, CreateConnectionRequest, UpdateConnectionRequest,
};
use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::output::{print_error, print_item, print_success, OutputFormat, TableDisplay};

#[derive(Debug, Clone, Subcommand)]
pub enum AccountCommands {
    /// Show a connected account
    Get {
        /// AliCloud account ID
        id: String,
    },

    /// Connect an AliCloud account
    Create {
        /// AliCloud account ID
        id: String,

        /// ARN of the RAM role VisionOne assumes
        #[arg(long)]
        role_arn: String,

        /// ID of the OIDC provider in the AliCloud account
        #[arg(long)]
        oidc_provider_id: String,

        /// Region of the parent stack
        #[arg(long)]
        parent_stack_region: String,

        /// Display name in VisionOne
        #[arg(short, long, default_value = "")]
        name: String,

        /// Description in VisionOne
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Change the name or description of a connected account
    Update {
        /// AliCloud account ID
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Disconnect an AliCloud account
    Delete {
        /// AliCloud account ID
        id: String,
    },
}

/// Connected account display wrapper for serialization
#[derive(Debug, Serialize)]
pub struct AccountDisplay {
    pub account_id: String,
    pub name: String,
    pub description: String,
    pub state: String,
    pub role_arn: String,
    pub oidc_provider_id: String,
    pub parent_stack_region: String,
    pub created_date_time: String,
    pub updated_date_time: String,
    pub last_synced_date_time: String,
}

impl From<ConnectedAccount> for AccountDisplay {
    fn from(account: ConnectedAccount) -> Self {
        Self {
            account_id: account.id,
            name: account.name,
            description: account.description,
            state: account.state,
            role_arn: account.role_arn,
            oidc_provider_id: account.oidc_provider_id,
            parent_stack_region: account.parent_stack_region,
            created_date_time: account.created_date_time,
            updated_date_time: account.updated_date_time,
            last_synced_date_time: account.last_synced_date_time,
        }
    }
}

impl TableDisplay for AccountDisplay {
    fn headers() -> Vec<&'static str> {
        vec![
            "Account ID",
            "Name",
            "Description",
            "State",
            "Role ARN",
            "OIDC Provider",
            "Parent Stack Region",
            "Created",
            "Updated",
            "Last Synced",
        ]
    }

    fn row(&self) -> Vec<String> {
        [
            &self.account_id,
            &self.name,
            &self.description,
            &self.state,
            &self.role_arn,
            &self.oidc_provider_id,
            &self.parent_stack_region,
            &self.created_date_time,
            &self.updated_date_time,
            &self.last_synced_date_time,
        ]
        .into_iter()
        .map(|v| if v.is_empty() { "-".to_string() } else { v.clone() })
        .collect()
    }
}

pub async fn execute(cmd: AccountCommands, client: CamClient, format: OutputFormat) -> Result<()> {
    match cmd {
        AccountCommands::Get { id } => match client.read_connection(&id).await? {
            Some(account) => print_item(&AccountDisplay::from(account), format),
            None => {
                print_error(&format!("Cannot find connected account with ID: {}", id));
                std::process::exit(1);
            }
        },

        AccountCommands::Create {
            id,
            role_arn,
            oidc_provider_id,
            parent_stack_region,
            name,
            description,
        } => {
            let request = CreateConnectionRequest {
                account_id: id,
                region: parent_stack_region,
                role_arn,
                oidc_provider_id,
                name,
                description,
            };
            client.create_connection(&request).await?;
            print_success(&format!("Connected account {}", request.account_id), format);
        }

        AccountCommands::Update { id, name, description } => {
            let request = UpdateConnectionRequest { name, description };
            if request.is_empty() {
                bail!("Nothing to update: pass --name or --description");
            }
            client.update_connection(&id, &request).await?;
            print_success(&format!("Updated connected account {}", id), format);
        }

        AccountCommands::Delete { id } => {
            client.delete_connection(&id).await?;
            print_success(&format!("Deleted connected account {}", id), format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_matches_headers() {
        let display = AccountDisplay::from(ConnectedAccount {
            id: "a1".into(),
            state: "connected".into(),
            ..Default::default()
        });

        let row = display.row();
        assert_eq!(row.len(), AccountDisplay::headers().len());
        assert_eq!(row[0], "a1");
        assert_eq!(row[1], "-");
        assert_eq!(row[3], "connected");
    }
}
