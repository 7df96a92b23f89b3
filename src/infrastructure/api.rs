//! HTTP boundary to the service-request backend.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{Catalog, Employee, MenuItem, OrderPayload};

use super::config::AppConfig;

pub const GENERIC_FAILURE: &str = "The order could not be submitted. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Text for the blocking alert: the server's message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// `{success, data, message}` wrapper used by every backend response.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    department: String,
    #[serde(flatten)]
    employee: Employee,
}

/// Unwraps a response body into the envelope's `data`.
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !(200..300).contains(&status) => return Err(ApiError::Status(status)),
        Err(e) => return Err(ApiError::Malformed(e.to_string())),
    };
    if !envelope.success {
        return Err(ApiError::Rejected(envelope.message.unwrap_or_default()));
    }
    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }
    let data = envelope
        .data
        .ok_or_else(|| ApiError::Malformed("missing data".to_string()))?;
    serde_json::from_value(data).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Reads the server-assigned id, which may arrive as a string or a number.
pub fn order_id(data: &Value) -> Result<String, ApiError> {
    match data.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ApiError::Malformed("missing order id".to_string())),
    }
}

pub trait OrderApi {
    /// Submits an order and returns the id the server assigned to it.
    fn submit_order(&self, payload: &OrderPayload) -> Result<String, ApiError>;

    fn fetch_menu_items(&self) -> Result<Vec<MenuItem>, ApiError>;

    fn fetch_employees(&self) -> Result<BTreeMap<String, Vec<Employee>>, ApiError>;

    fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        Ok(Catalog {
            menu_items: self.fetch_menu_items()?,
            employees_by_department: self.fetch_employees()?,
        })
    }
}

pub struct HttpOrderApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpOrderApi {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorize(self.client.get(self.url(path))).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        parse_envelope(status, &body)
    }
}

impl OrderApi for HttpOrderApi {
    fn submit_order(&self, payload: &OrderPayload) -> Result<String, ApiError> {
        info!(
            orders = payload.employee_orders.len(),
            category = %payload.category,
            "submitting service request"
        );
        let request = self
            .client
            .post(self.url("/service-requests"))
            .json(payload);
        let response = self.authorize(request).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        let data: Value = parse_envelope(status, &body).inspect_err(|e| {
            warn!(status, error = %e, "service request failed");
        })?;
        let id = order_id(&data)?;
        info!(%id, "service request accepted");
        Ok(id)
    }

    fn fetch_menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        self.get("/menu-items")
    }

    fn fetch_employees(&self) -> Result<BTreeMap<String, Vec<Employee>>, ApiError> {
        let entries: Vec<DirectoryEntry> = self.get("/employees")?;
        Ok(Catalog::group_employees(
            entries.into_iter().map(|entry| (entry.department, entry.employee)),
        ))
    }
}
