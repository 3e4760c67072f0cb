//! Conformance run execution
//!
//! Runs the checks one at a time in their fixed order. Nothing a check does
//! can stop the run: transport errors, assertion failures and panics all
//! become a failed [`TestResult`] and the next case starts regardless.

use anyhow::{Context, Result};
use chrono::Utc;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, warn};

use crate::checks::{self, CheckError};
use crate::config::Settings;
use crate::http::HttpClient;
use crate::models::{RunSummary, TestCase, TestResult};
use crate::utils::Timer;

/// Sequential runner for the backend conformance checks
pub struct ConformanceRunner {
    settings: Settings,
    client: HttpClient,
    selected: Vec<TestCase>,
}

impl ConformanceRunner {
    /// Create a new runner against resolved settings
    pub fn new(settings: Settings, timeout_secs: Option<u64>) -> Result<Self> {
        let client = HttpClient::with_timeout(timeout_secs).context("Failed to create HTTP client")?;
        Ok(Self {
            settings,
            client,
            selected: TestCase::all(),
        })
    }

    /// Restrict the run to a subset; run order stays fixed
    pub fn with_tests(mut self, mut test_cases: Vec<TestCase>) -> Self {
        if !test_cases.is_empty() {
            test_cases.sort();
            test_cases.dedup();
            self.selected = test_cases;
        }
        self
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.selected
    }

    /// Run a single test case; never fails, the outcome is in the result
    pub async fn run_test(&self, test_case: TestCase) -> TestResult {
        info!("{}", "-".repeat(50));
        info!("Running test: {}", test_case.name());

        let check = checks::run_check(test_case, &self.settings, &self.client);
        self.run_guarded(test_case, check).await
    }

    /// Time a check and turn every outcome, panics included, into a result
    async fn run_guarded<F>(&self, test_case: TestCase, check: F) -> TestResult
    where
        F: Future<Output = Result<Option<Value>, CheckError>>,
    {
        let timer = Timer::start(test_case.name());
        let outcome = AssertUnwindSafe(check).catch_unwind().await;
        let duration_ms = timer.stop().as_millis() as u64;

        match outcome {
            Ok(Ok(details)) => {
                info!("✅ {} test passed", test_case.name());
                let result = TestResult::pass(test_case, duration_ms);
                match details {
                    Some(details) => result.with_details(details),
                    None => result,
                }
            }
            Ok(Err(e)) if e.is_assertion() => {
                warn!("❌ {} test failed: {}", test_case.name(), e);
                TestResult::fail(test_case, duration_ms, e.to_string())
            }
            Ok(Err(e)) => {
                error!("❌ {} test failed: {}", test_case.name(), e);
                TestResult::error(test_case, duration_ms, e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(
                    "❌ Test '{}' failed with unexpected error: {}",
                    test_case.name(),
                    message
                );
                TestResult::error(
                    test_case,
                    duration_ms,
                    format!("unexpected error: {message}"),
                )
            }
        }
    }

    /// Run the selected test cases sequentially
    pub async fn run_all(&self) -> RunSummary {
        let started_at = Utc::now();
        info!("{}", "=".repeat(50));
        info!("Starting backend API tests at {}", started_at.to_rfc3339());
        info!("Testing backend at: {}", self.settings.api_url());
        info!("{}", "=".repeat(50));

        let mut results = Vec::with_capacity(self.selected.len());
        for &test_case in self.test_cases() {
            results.push(self.run_test(test_case).await);
        }

        let summary = RunSummary::new(started_at, self.settings.base_url(), results);

        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            summary.total_duration_ms,
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
