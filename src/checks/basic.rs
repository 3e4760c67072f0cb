//! Root health check and unknown-path handling
//!
//! Cases 1 and 3: `GET /` and `GET /nonexistent_endpoint` under the API prefix.

use serde_json::{json, Value};
use tracing::info;

use super::assert::{expect_field, expect_object, expect_status, expect_str_field, CheckError};
use crate::config::Settings;
use crate::http::HttpClient;

/// Case 1: `GET /` answers `{"message": "Hello World"}`
#[derive(Clone, Debug)]
pub struct HealthCheckTest {
    pub url: String,
    pub expected_message: String,
}

impl HealthCheckTest {
    pub fn new(settings: &Settings) -> Self {
        Self {
            url: settings.api_endpoint("/"),
            expected_message: "Hello World".to_string(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<Option<Value>, CheckError> {
        let resp = client.get(&self.url).await?;
        info!("Status code: {}", resp.status_code);
        info!("Response: {}", resp.body_preview(200));

        expect_status(&resp, &[200])?;

        let body: Value = resp.json()?;
        let object = expect_object(&body)?;
        expect_str_field(object, "message", &self.expected_message)?;

        Ok(None)
    }
}

/// Case 3: unknown paths come back as 404 with a `detail` field
#[derive(Clone, Debug)]
pub struct InvalidEndpointTest {
    pub url: String,
}

impl InvalidEndpointTest {
    pub fn new(settings: &Settings) -> Self {
        Self {
            url: settings.api_endpoint("/nonexistent_endpoint"),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<Option<Value>, CheckError> {
        let resp = client.get(&self.url).await?;
        info!("Status code: {}", resp.status_code);
        info!("Response: {}", resp.body_preview(200));

        expect_status(&resp, &[404])?;

        let body: Value = resp.json()?;
        let object = expect_object(&body)?;
        let detail = expect_field(object, "detail")?;

        Ok(Some(json!({ "detail": detail })))
    }
}
