//! VisionOne CAM REST client
//!
//! Translates the four connected account operations into authenticated HTTP
//! calls. Each call is a single round trip: no caching and no retries.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{CamConfig, EndpointType};
use crate::error::{CamError, Result};
use crate::types::{ConnectedAccount, CreateConnectionRequest, UpdateConnectionRequest};

pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";
pub const TASK_ID_HEADER: &str = "x-task-id";
pub const TRACE_ID_HEADER: &str = "x-trace-id";

const ACCOUNT_ID_PLACEHOLDER: &str = "{id}";

/// Path templates indexed by `[operation][endpoint type]`
const PATH_TEMPLATES: [[&str; 2]; 4] = [
    // create
    ["/v3.0/cam/alibabaAccounts", "/public/cam/api/ui/alibabaAccounts"],
    // read
    [
        "/v3.0/cam/alibabaAccounts/{id}",
        "/public/cam/api/ui/alibabaAccounts/{id}",
    ],
    // update
    [
        "/v3.0/cam/alibabaAccounts/{id}",
        "/public/cam/api/ui/alibabaAccounts/{id}",
    ],
    // delete
    [
        "/v3.0/cam/alibabaAccounts/{id}",
        "/public/cam/api/ui/alibabaAccounts/{id}",
    ],
];

/// Logical CAM operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    fn index(self) -> usize {
        match self {
            Operation::Create => 0,
            Operation::Read => 1,
            Operation::Update => 2,
            Operation::Delete => 3,
        }
    }

    /// HTTP method used for the operation
    pub fn method(self) -> Method {
        match self {
            Operation::Create => Method::POST,
            Operation::Read => Method::GET,
            Operation::Update => Method::PATCH,
            Operation::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

impl FromStr for Operation {
    type Err = CamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Operation::Create),
            "read" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            other => Err(CamError::Configuration(format!("unknown operation: {}", other))),
        }
    }
}

fn endpoint_index(endpoint_type: EndpointType) -> usize {
    match endpoint_type {
        EndpointType::Automation => 0,
        EndpointType::Express => 1,
    }
}

/// Resolve the request path for an operation.
///
/// The account id is substituted verbatim into templates that carry a
/// placeholder and ignored by the create template.
pub fn resolve_url(
    operation: Operation,
    endpoint_type: &str,
    account_id: Option<&str>,
) -> Result<String> {
    let endpoint_type: EndpointType = endpoint_type.parse()?;
    let template = PATH_TEMPLATES[operation.index()][endpoint_index(endpoint_type)];
    if template.is_empty() {
        return Err(CamError::Configuration(format!(
            "no {} path defined for endpoint type {}",
            operation, endpoint_type
        )));
    }

    if !template.contains(ACCOUNT_ID_PLACEHOLDER) {
        return Ok(template.to_string());
    }

    match account_id {
        Some(id) if !id.is_empty() => Ok(template.replacen(ACCOUNT_ID_PLACEHOLDER, id, 1)),
        _ => Err(CamError::Validation(format!(
            "account id is required for {}",
            operation
        ))),
    }
}

/// Client for the VisionOne cloud account management API
pub struct CamClient {
    config: CamConfig,
    endpoint_type: EndpointType,
    http: reqwest::Client,
}

impl fmt::Debug for CamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CamClient")
            .field("config", &self.config)
            .field("endpoint_type", &self.endpoint_type)
            .finish()
    }
}

impl CamClient {
    /// Build a client, failing if any configuration value is missing
    pub fn new(config: CamConfig) -> Result<Self> {
        let endpoint_type = config.validate()?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| CamError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            endpoint = %config.base_url(),
            endpoint_type = %endpoint_type,
            region = %config.region,
            "VisionOne CAM client created"
        );

        Ok(Self {
            config,
            endpoint_type,
            http,
        })
    }

    pub fn config(&self) -> &CamConfig {
        &self.config
    }

    pub fn endpoint_type(&self) -> EndpointType {
        self.endpoint_type
    }

    /// Absolute URL for an operation
    pub fn url(&self, operation: Operation, account_id: Option<&str>) -> Result<String> {
        let path = resolve_url(operation, self.endpoint_type.as_str(), account_id)?;
        Ok(format!("{}{}", self.config.base_url(), path))
    }

    /// Send an authenticated request.
    ///
    /// Every call carries freshly generated task and trace ids. The response
    /// is returned whatever its status.
    pub async fn do_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let task_id = Uuid::new_v4();
        let trace_id = Uuid::new_v4();

        debug!(
            method = %method,
            url = %url,
            task_id = %task_id,
            trace_id = %trace_id,
            "Sending CAM request"
        );

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CUSTOMER_ID_HEADER, &self.config.business_id)
            .header(TASK_ID_HEADER, task_id.to_string())
            .header(TRACE_ID_HEADER, trace_id.to_string())
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        debug!(status = response.status().as_u16(), task_id = %task_id, "CAM response received");
        Ok(response)
    }

    /// Register a connected account
    pub async fn create_connection(&self, request: &CreateConnectionRequest) -> Result<()> {
        let url = self.url(Operation::Create, None)?;
        let body = serde_json::to_vec(request)?;
        let response = self.do_request(Operation::Create.method(), &url, Some(body)).await?;
        ensure_success(response).await?;

        info!(account_id = %request.account_id, "Connected account created");
        Ok(())
    }

    /// Fetch a connected account.
    ///
    /// Returns `Ok(None)` when the backend answers 404.
    pub async fn read_connection(&self, account_id: &str) -> Result<Option<ConnectedAccount>> {
        require_account_id(account_id)?;

        let url = self.url(Operation::Read, Some(account_id))?;
        let response = self.do_request(Operation::Read.method(), &url, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(account_id = %account_id, "Connected account not found");
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let account: ConnectedAccount = serde_json::from_slice(&bytes)?;
        Ok(Some(account))
    }

    /// Change the name and/or description of a connected account
    pub async fn update_connection(
        &self,
        account_id: &str,
        request: &UpdateConnectionRequest,
    ) -> Result<()> {
        require_account_id(account_id)?;

        let url = self.url(Operation::Update, Some(account_id))?;
        let body = serde_json::to_vec(request)?;
        let response = self.do_request(Operation::Update.method(), &url, Some(body)).await?;
        ensure_success(response).await?;

        info!(account_id = %account_id, "Connected account updated");
        Ok(())
    }

    /// Remove a connected account
    pub async fn delete_connection(&self, account_id: &str) -> Result<()> {
        require_account_id(account_id)?;

        let url = self.url(Operation::Delete, Some(account_id))?;
        let response = self.do_request(Operation::Delete.method(), &url, None).await?;
        ensure_success(response).await?;

        info!(account_id = %account_id, "Connected account deleted");
        Ok(())
    }
}

fn require_account_id(account_id: &str) -> Result<()> {
    if account_id.is_empty() {
        return Err(CamError::Validation("account id must not be empty".to_string()));
    }
    Ok(())
}

/// Pass through responses below 300, turn everything else into a backend error
async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().as_u16() < 300 {
        return Ok(response);
    }
    Err(backend_error(response).await)
}

async fn backend_error(response: Response) -> CamError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(status, error = %e, "Failed to read CAM error body");
            format!("<unreadable response body: {}>", e)
        }
    };
    let details: Option<HashMap<String, Value>> = serde_json::from_str(&body).ok();
    let message = details.as_ref().and_then(error_message);

    warn!(status, message = message.as_deref().unwrap_or(""), "CAM request failed");

    CamError::Backend {
        status,
        body,
        message,
    }
}

/// Pick a readable message out of a loose error payload.
///
/// Handles both `{"message": "..."}` and `{"error": {"message": "..."}}`.
fn error_message(details: &HashMap<String, Value>) -> Option<String> {
    for key in ["message", "errorMessage", "error"] {
        match details.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }
    None
}
