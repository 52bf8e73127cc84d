//! Provider errors and Terraform diagnostics

use alicloudsecurity_common::CamError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for resource and data source handlers
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A message attached to the operation that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute path the diagnostic refers to
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    pub fn attribute_error(
        attribute: &str,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            attribute: Some(attribute.to_string()),
            ..Self::error(summary, detail)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// True when any diagnostic is an error
pub fn has_error(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Handler error types
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Client configuration is not set up properly. Please configure the provider.")]
    NotConfigured,

    #[error("Account ID cannot be null or unknown.")]
    MissingAccountId,

    #[error("Attribute {0} is required")]
    MissingAttribute(&'static str),

    #[error("Attribute {0} cannot be changed after creation; the resource must be replaced")]
    Immutable(&'static str),

    #[error("Cannot find connected account with ID: {0}")]
    NotFound(String),

    #[error("Unable to {action} connected account: {source}")]
    Api {
        action: &'static str,
        #[source]
        source: CamError,
    },

    #[error("Unknown type: {0}")]
    UnknownType(String),
}

impl ProviderError {
    pub fn api(action: &'static str) -> impl FnOnce(CamError) -> ProviderError {
        move |source| ProviderError::Api { action, source }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured => "Client Error",
            ProviderError::MissingAccountId => "Account ID is required",
            ProviderError::MissingAttribute(_) => "Missing required attribute",
            ProviderError::Immutable(_) => "Attribute requires replacement",
            ProviderError::NotFound(_) => "Read Error",
            ProviderError::Api { .. } => "API Error",
            ProviderError::UnknownType(_) => "Unsupported type",
        }
    }

    fn attribute(&self) -> Option<&'static str> {
        match self {
            ProviderError::MissingAccountId => Some("account_id"),
            ProviderError::MissingAttribute(name) | ProviderError::Immutable(name) => Some(*name),
            _ => None,
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(e: ProviderError) -> Self {
        Diagnostic {
            severity: Severity::Error,
            summary: e.summary().to_string(),
            detail: e.to_string(),
            attribute: e.attribute().map(str::to_string),
        }
    }
}
