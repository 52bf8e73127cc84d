//! Resource Implementations
//!
//! Implements the CRUD operations for each resource type.

pub mod connected_account;

use alicloudsecurity_common::CamClient;

use crate::error::{Diagnostic, Result};
use crate::state::DynamicValue;

/// Trait for resource operations
#[async_trait::async_trait]
pub trait Resource {
    /// Resource type name
    fn type_name() -> &'static str;

    /// Create a new resource from the planned values.
    ///
    /// Once the remote object exists the state is always returned, with
    /// warnings for anything that failed afterwards.
    async fn create(client: &CamClient, config: &DynamicValue) -> Result<(DynamicValue, Vec<Diagnostic>)>;

    /// Refresh an existing resource; `None` when it no longer exists
    async fn read(client: &CamClient, state: &DynamicValue) -> Result<Option<DynamicValue>>;

    /// Update an existing resource
    async fn update(client: &CamClient, state: &DynamicValue, config: &DynamicValue) -> Result<DynamicValue>;

    /// Delete a resource
    async fn delete(client: &CamClient, state: &DynamicValue) -> Result<()>;

    /// State to read back when importing by ID
    fn import_state(id: &str) -> DynamicValue;
}
