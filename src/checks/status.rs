//! Status check create/list round trip
//!
//! Case 4: `POST /status` creates a record, `GET /status` must list it.
//! This is the only case that touches the backend's database.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::assert::{
    display_value, expect_array, expect_field, expect_object, expect_status, expect_str_field,
    AssertionFailure, CheckError,
};
use crate::config::Settings;
use crate::http::HttpClient;
use crate::models::{StatusCheck, StatusCheckCreate};

/// Unique client name for this run, e.g. `test_client_2024-01-01T00:00:00.000000`
pub fn generate_client_name() -> String {
    format!("test_client_{}", Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f"))
}

#[derive(Clone, Debug)]
pub struct StatusEndpointTest {
    pub url: String,
    pub client_name: String,
}

impl StatusEndpointTest {
    pub fn new(settings: &Settings) -> Self {
        Self {
            url: settings.api_endpoint("/status"),
            client_name: generate_client_name(),
        }
    }

    #[cfg(test)]
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub async fn run(&self, client: &HttpClient) -> Result<Option<Value>, CheckError> {
        let created_id = self.create(client).await?;
        let listed = self.list(client).await?;

        // Entries without an id can never match; skip rather than fail
        let found = listed
            .iter()
            .filter_map(|item| StatusCheck::deserialize(item).ok())
            .find(|check| check.has_id(&created_id));

        match found {
            Some(check) => debug!(
                "Found status check {} (client_name: {})",
                display_value(&check.id),
                check.client_name().unwrap_or("-")
            ),
            None => return Err(AssertionFailure::NotListed(display_value(&created_id)).into()),
        }

        Ok(Some(json!({
            "id": created_id,
            "client_name": self.client_name,
            "listed": listed.len(),
        })))
    }

    /// Create the record and return its server-assigned id
    async fn create(&self, client: &HttpClient) -> Result<Value, CheckError> {
        let resp = client
            .post_json(&self.url, &StatusCheckCreate::new(&self.client_name))
            .await?;
        info!("Create status code: {}", resp.status_code);
        info!("Create response: {}", resp.body_preview(200));

        expect_status(&resp, &[200])?;

        let body: Value = resp.json()?;
        let object = expect_object(&body)?;
        let id = expect_field(object, "id")?.clone();
        expect_str_field(object, "client_name", &self.client_name)?;

        debug!("Created status check {}", id);
        Ok(id)
    }

    async fn list(&self, client: &HttpClient) -> Result<Vec<Value>, CheckError> {
        let resp = client.get(&self.url).await?;
        info!("List status code: {}", resp.status_code);

        expect_status(&resp, &[200])?;

        let body: Value = resp.json()?;
        let items = expect_array(&body)?;
        let head = &items[..items.len().min(2)];
        info!(
            "List response (first few items): {}",
            serde_json::to_string_pretty(head).unwrap_or_default()
        );

        Ok(items.clone())
    }
}
