//! Backend conformance checks
//!
//! The five cases, in run order:
//!
//! 1. Health Check - `GET /api/`
//! 2. CORS Configuration - `OPTIONS /api/` preflight
//! 3. Invalid Endpoint - `GET /api/nonexistent_endpoint`
//! 4. Status Endpoint - `POST /api/status` then `GET /api/status`
//! 5. API Documentation - `GET /docs`
//!
//! Each check returns optional JSON details on success or a [`CheckError`]
//! describing why it did not pass.

mod assert;
mod basic;
mod cors;
mod docs;
mod status;

pub use assert::{AssertionFailure, CheckError};
pub use basic::{HealthCheckTest, InvalidEndpointTest};
pub use cors::CorsTest;
pub use docs::DocsTest;
pub use status::StatusEndpointTest;

use serde_json::Value;

use crate::config::Settings;
use crate::http::HttpClient;
use crate::models::TestCase;

/// Run a specific test case against the resolved backend
pub async fn run_check(
    test_case: TestCase,
    settings: &Settings,
    client: &HttpClient,
) -> Result<Option<Value>, CheckError> {
    match test_case {
        TestCase::HealthCheck => HealthCheckTest::new(settings).run(client).await,
        TestCase::CorsConfiguration => CorsTest::new(settings).run(client).await,
        TestCase::InvalidEndpoint => InvalidEndpointTest::new(settings).run(client).await,
        TestCase::StatusEndpoint => StatusEndpointTest::new(settings).run(client).await,
        TestCase::ApiDocumentation => DocsTest::new(settings).run(client).await,
    }
}
