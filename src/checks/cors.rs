//! CORS preflight check
//!
//! Case 2: `OPTIONS /` with a preflight request must answer with the three
//! `Access-Control-Allow-*` headers. Only presence is checked.

use serde_json::{json, Value};
use tracing::info;

use super::assert::{expect_header, expect_status, CheckError};
use crate::config::Settings;
use crate::http::{HttpClient, HttpRequest};

/// Headers that must appear on the preflight response
pub const REQUIRED_HEADERS: [&str; 3] = [
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
];

#[derive(Clone, Debug)]
pub struct CorsTest {
    pub url: String,
    pub origin: String,
    pub request_method: String,
    pub request_headers: String,
}

impl CorsTest {
    pub fn new(settings: &Settings) -> Self {
        Self {
            url: settings.api_endpoint("/"),
            origin: "http://example.com".to_string(),
            request_method: "GET".to_string(),
            request_headers: "Content-Type".to_string(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<Option<Value>, CheckError> {
        let request = HttpRequest::options(&self.url)
            .header("Origin", &self.origin)
            .header("Access-Control-Request-Method", &self.request_method)
            .header("Access-Control-Request-Headers", &self.request_headers);

        let resp = client.send(request).await?;
        info!("Status code: {}", resp.status_code);
        info!(
            "CORS headers: {}",
            serde_json::to_string_pretty(&resp.headers).unwrap_or_default()
        );

        expect_status(&resp, &[200, 204])?;
        for name in REQUIRED_HEADERS {
            expect_header(&resp, name)?;
        }

        let found: serde_json::Map<String, Value> = REQUIRED_HEADERS
            .iter()
            .filter_map(|name| {
                resp.get_header(name)
                    .map(|v| (name.to_string(), Value::String(v.clone())))
            })
            .collect();

        Ok(Some(json!({ "headers": found })))
    }
}
