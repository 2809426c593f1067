use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::log::mask;
use crate::tlog;

use super::config::Config;
use super::models::{
    ApiErrorBody, ListLogsOpts, ListOperationsOpts, LogEntry, Operation, Organization, Project,
    Resource, Scope, Stack,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MANAGEMENT_API_VERSION: &str = "v2021-06-07";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("decoding response: {0}")]
    Decode(String),
}

/// Everything the interactive views need from the Blueprints API.
pub trait BlueprintsApi: Send + Sync {
    fn list_organizations(&self) -> Result<Vec<Organization>, ApiError>;
    fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    fn list_stacks(&self) -> Result<Vec<Stack>, ApiError>;
    fn list_resources(&self, stack_id: &str) -> Result<Vec<Resource>, ApiError>;
    fn list_operations(
        &self,
        stack_id: &str,
        opts: &ListOperationsOpts,
    ) -> Result<Vec<Operation>, ApiError>;
    fn list_logs(&self, opts: &ListLogsOpts) -> Result<Vec<LogEntry>, ApiError>;
    /// Changes the scope headers sent with every later blueprints request.
    fn set_scope(&self, scope: &Scope);
}

pub struct BlueprintsClient {
    agent: ureq::Agent,
    api_url: String,
    base_url: String,
    token: String,
    scope: Mutex<Option<Scope>>,
}

impl BlueprintsClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .build()
            .new_agent();

        let api_url = config.api_url.trim_end_matches('/').to_string();
        Self {
            agent,
            base_url: format!("{}/vX/blueprints", api_url),
            api_url,
            token: config.token.clone(),
            scope: Mutex::new(config.scope.clone()),
        }
    }

    fn current_scope(&self) -> (String, String) {
        let guard = match self.scope.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.as_ref() {
            Some(scope) => (scope.kind.as_str().to_string(), scope.id.clone()),
            None => (String::new(), String::new()),
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let (scope_type, scope_id) = self.current_scope();

        tlog!(info, "GET {} {:?}", url, params);
        tlog!(info, "Authorization: Bearer {}", mask(&self.token));
        tlog!(info, "x-sanity-scope-type: {}", scope_type);
        tlog!(info, "x-sanity-scope-id: {}", scope_id);

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("x-sanity-scope-type", &scope_type)
            .header("x-sanity-scope-id", &scope_id)
            .header("Accept", "application/json");
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let resp = request.call().map_err(|e| {
            tlog!(error, "request error: {}", e);
            ApiError::Transport(e.to_string())
        })?;
        read_json(resp, true)
    }

    fn get_management<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}{}", self.api_url, MANAGEMENT_API_VERSION, path);
        tlog!(info, "GET {}", url);

        let resp = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .call()
            .map_err(|e| {
                tlog!(error, "request error: {}", e);
                ApiError::Transport(e.to_string())
            })?;
        read_json(resp, false)
    }
}

fn read_json<T: DeserializeOwned>(
    resp: ureq::http::Response<ureq::Body>,
    log_body: bool,
) -> Result<T, ApiError> {
    let status = resp.status().as_u16();
    let body = resp
        .into_body()
        .read_to_string()
        .map_err(|e| ApiError::Transport(format!("reading response: {}", e)))?;

    tlog!(info, "Response: {} ({} bytes)", status, body.len());
    if log_body {
        tlog!(info, "Body: {}", body);
    }

    if status != 200 {
        let err = status_error(status, &body);
        tlog!(error, "{}", err);
        return Err(err);
    }
    decode(&body)
}

fn status_error(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => body.to_string(),
    };
    ApiError::Status { status, message }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tlog!(
            error,
            "decode error: {} - body: {}",
            e,
            body.chars().take(500).collect::<String>()
        );
        ApiError::Decode(e.to_string())
    })
}

impl BlueprintsApi for BlueprintsClient {
    fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.get_management("/organizations")
    }

    fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_management("/projects")
    }

    fn list_stacks(&self) -> Result<Vec<Stack>, ApiError> {
        let stacks: Vec<Stack> = self.get("/stacks", &[])?;
        tlog!(info, "parsed {} stacks", stacks.len());
        Ok(stacks)
    }

    fn list_resources(&self, stack_id: &str) -> Result<Vec<Resource>, ApiError> {
        self.get(&format!("/stacks/{}/resources", stack_id), &[])
    }

    fn list_operations(
        &self,
        stack_id: &str,
        opts: &ListOperationsOpts,
    ) -> Result<Vec<Operation>, ApiError> {
        self.get(&format!("/stacks/{}/operations", stack_id), &opts.query())
    }

    fn list_logs(&self, opts: &ListLogsOpts) -> Result<Vec<LogEntry>, ApiError> {
        self.get("/logs", &opts.query())
    }

    fn set_scope(&self, scope: &Scope) {
        tlog!(info, "scope set to {} {}", scope.kind, scope.id);
        match self.scope.lock() {
            Ok(mut guard) => *guard = Some(scope.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(scope.clone()),
        }
    }
}
