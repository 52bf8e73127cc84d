//! AliCloud Security Common Library
//!
//! VisionOne CAM client, connected account types, and configuration shared
//! by the Terraform provider and the CLI.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use client::{resolve_url, CamClient, Operation};
pub use config::{region_endpoint, CamConfig, EndpointType};
pub use error::{CamError, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
