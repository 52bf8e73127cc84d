//! AliCloud Security Terraform Provider
//!
//! Provider configuration, resource and data source handlers for managing
//! VisionOne connected AliCloud accounts. Handlers map Terraform values onto
//! calls of the shared CAM client.

pub mod config;
pub mod data_sources;
pub mod error;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod state;

pub use error::{Diagnostic, ProviderError, Severity};
pub use provider::{AliCloudSecurityProvider, PROVIDER_TYPE_NAME};
pub use state::DynamicValue;
