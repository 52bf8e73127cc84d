//! Data Source Implementations

pub mod connected_account;

use alicloudsecurity_common::CamClient;

use crate::error::Result;
use crate::state::DynamicValue;

/// Trait for data source reads
#[async_trait::async_trait]
pub trait DataSource {
    /// Data source type name
    fn type_name() -> &'static str;

    /// Resolve the data source from its configuration
    async fn read(client: &CamClient, config: &DynamicValue) -> Result<DynamicValue>;
}
