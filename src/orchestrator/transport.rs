//! Outbound calls to the ProfFinder backend

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::TransportError;

/// Default client-side deadline for one request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends one query and returns the raw 2xx response body.
///
/// Implementations block; the TUI calls them from a worker thread.
pub trait QueryBackend {
    fn send_query(&self, query: &str) -> Result<String, TransportError>;
}

impl<F> QueryBackend for F
where
    F: Fn(&str) -> Result<String, TransportError>,
{
    fn send_query(&self, query: &str) -> Result<String, TransportError> {
        self(query)
    }
}

/// Where and how to reach the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub process_path: String,
    pub health_path: String,
    /// Name of the single JSON body field carrying the query
    pub query_field: String,
    pub timeout: Duration,
}

impl Endpoint {
    pub fn process_url(&self) -> String {
        join_url(&self.base_url, &self.process_path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            process_path: "/api/process".to_string(),
            health_path: "/health".to_string(),
            query_field: "text".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Body of the backend health probe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Blocking HTTP client for the backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: Endpoint,
}

impl HttpBackend {
    pub fn new(endpoint: Endpoint) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Probe the backend health endpoint
    pub fn health(&self) -> Result<HealthStatus, TransportError> {
        let url = self.endpoint.health_url();
        debug!(%url, "Probing backend health");

        let response = self.client.get(&url).send().map_err(|e| self.map_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        response.json::<HealthStatus>().map_err(|e| TransportError::Network(e.to_string()))
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.endpoint.timeout)
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

impl QueryBackend for HttpBackend {
    fn send_query(&self, query: &str) -> Result<String, TransportError> {
        let url = self.endpoint.process_url();
        let mut body = serde_json::Map::new();
        body.insert(self.endpoint.query_field.clone(), json!(query));

        info!(%url, query_len = query.len(), "Sending query");
        let response =
            self.client.post(&url).json(&body).send().map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            info!(status = status.as_u16(), "Backend rejected query");
            return Err(TransportError::Status(status.as_u16()));
        }

        let text = response.text().map_err(|e| self.map_error(e))?;
        debug!(bytes = text.len(), "Received response body");
        Ok(text)
    }
}
