//! HTTP client for backend conformance checks
//!
//! Thin wrapper over reqwest that captures status, headers, and body of
//! every exchange so checks can assert on them after the fact.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Request timed out")]
    TimedOut,

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

/// HTTP client for conformance checks
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    timeout_secs: Option<u64>,
}

impl HttpClient {
    /// Create a client that relies on reqwest's default (unbounded) timeout
    #[cfg(test)]
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(None)
    }

    /// Create client with an optional per-request timeout
    pub fn with_timeout(timeout_secs: Option<u64>) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        debug!("Sending {} request to {}", request.method, request.url);

        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpError::InvalidMethod(request.method.clone()))?;

        let mut req_builder = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                timeout_error(self.timeout_secs)
            } else if e.is_connect() {
                HttpError::ConnectionRefused(request.url.clone())
            } else {
                HttpError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();

        let mut headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_lowercase(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            start.elapsed().as_millis()
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers,
            body,
        })
    }

    /// Convenience method for GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.send(HttpRequest::get(url)).await
    }

    /// POST a JSON body
    pub async fn post_json(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<HttpResponse, HttpError> {
        let body = serde_json::to_string(body).map_err(|e| HttpError::RequestFailed(e.to_string()))?;
        self.send(
            HttpRequest::post(url)
                .header("Content-Type", "application/json")
                .body(body),
        )
        .await
    }
}

/// Only claim a duration when one was configured
fn timeout_error(timeout_secs: Option<u64>) -> HttpError {
    match timeout_secs {
        Some(secs) => HttpError::Timeout(secs),
        None => HttpError::TimedOut,
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn options(url: impl Into<String>) -> Self {
        Self::new("OPTIONS", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Captured HTTP response; header names are stored lowercased
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    pub fn content_type(&self) -> &str {
        self.get_header("content-type")
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// First `max_chars` characters of the body, for logging
    pub fn body_preview(&self, max_chars: usize) -> String {
        match self.body.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &self.body[..idx]),
            None => self.body.clone(),
        }
    }
}
