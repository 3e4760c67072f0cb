//! Test result models for backend conformance runs
//!
//! Defines test cases, results, and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five conformance checks, in run order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    HealthCheck,
    CorsConfiguration,
    InvalidEndpoint,
    StatusEndpoint,
    ApiDocumentation,
}

impl TestCase {
    /// Get test case number (1-5)
    pub fn number(&self) -> u8 {
        match self {
            TestCase::HealthCheck => 1,
            TestCase::CorsConfiguration => 2,
            TestCase::InvalidEndpoint => 3,
            TestCase::StatusEndpoint => 4,
            TestCase::ApiDocumentation => 5,
        }
    }

    /// Get test case name
    pub fn name(&self) -> &'static str {
        match self {
            TestCase::HealthCheck => "Health Check",
            TestCase::CorsConfiguration => "CORS Configuration",
            TestCase::InvalidEndpoint => "Invalid Endpoint",
            TestCase::StatusEndpoint => "Status Endpoint",
            TestCase::ApiDocumentation => "API Documentation",
        }
    }

    /// Short description of what the case exercises
    pub fn description(&self) -> &'static str {
        match self {
            TestCase::HealthCheck => "GET / returns {\"message\": \"Hello World\"}",
            TestCase::CorsConfiguration => "OPTIONS / answers the preflight with CORS headers",
            TestCase::InvalidEndpoint => "unknown paths return 404 with a detail field",
            TestCase::StatusEndpoint => "POST /status then GET /status lists the new record",
            TestCase::ApiDocumentation => "GET /docs serves the Swagger UI page",
        }
    }

    /// Get all test cases in run order
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::HealthCheck,
            TestCase::CorsConfiguration,
            TestCase::InvalidEndpoint,
            TestCase::StatusEndpoint,
            TestCase::ApiDocumentation,
        ]
    }

    /// Parse from test number
    pub fn from_number(n: u8) -> Option<TestCase> {
        match n {
            1 => Some(TestCase::HealthCheck),
            2 => Some(TestCase::CorsConfiguration),
            3 => Some(TestCase::InvalidEndpoint),
            4 => Some(TestCase::StatusEndpoint),
            5 => Some(TestCase::ApiDocumentation),
            _ => None,
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test {}: {}", self.number(), self.name())
    }
}

/// Test execution status
///
/// `Fail` means the backend answered but an assertion did not hold.
/// `Error` means the check could not complete (transport, undecodable body, panic).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✅",
            TestStatus::Fail => "❌",
            TestStatus::Error => "❗",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASSED"),
            TestStatus::Fail => write!(f, "FAILED"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single test execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case: TestCase,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl TestResult {
    pub fn pass(test_case: TestCase, duration_ms: u64) -> Self {
        Self {
            test_case,
            status: TestStatus::Pass,
            duration_ms,
            message: None,
            details: None,
        }
    }

    pub fn fail(test_case: TestCase, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Fail,
            duration_ms,
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn error(test_case: TestCase, duration_ms: u64, error: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Error,
            duration_ms,
            message: Some(error.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Boolean outcome of the case
    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.test_case,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one conformance run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl RunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        base_url: impl Into<String>,
        results: Vec<TestResult>,
    ) -> Self {
        let total = results.len();
        let passed = results
            .iter()
            .filter(|r| r.status == TestStatus::Pass)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == TestStatus::Fail)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == TestStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            started_at,
            base_url: base_url.into(),
            total,
            passed,
            failed,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Logical AND of every recorded outcome
    pub fn is_all_passed(&self) -> bool {
        self.results.iter().all(TestResult::passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_numbers() {
        assert_eq!(TestCase::HealthCheck.number(), 1);
        assert_eq!(TestCase::ApiDocumentation.number(), 5);
    }

    #[test]
    fn test_case_from_number() {
        assert_eq!(TestCase::from_number(1), Some(TestCase::HealthCheck));
        assert_eq!(TestCase::from_number(4), Some(TestCase::StatusEndpoint));
        assert_eq!(TestCase::from_number(0), None);
        assert_eq!(TestCase::from_number(6), None);
    }

    #[test]
    fn test_all_cases_in_run_order() {
        let all = TestCase::all();
        assert_eq!(
            all,
            vec![
                TestCase::HealthCheck,
                TestCase::CorsConfiguration,
                TestCase::InvalidEndpoint,
                TestCase::StatusEndpoint,
                TestCase::ApiDocumentation,
            ]
        );
        for (i, case) in all.iter().enumerate() {
            assert_eq!(case.number() as usize, i + 1);
        }
    }

    #[test]
    fn test_result_creation() {
        let result = TestResult::pass(TestCase::HealthCheck, 100);
        assert!(result.passed());
        assert_eq!(result.duration_ms, 100);

        let result = TestResult::error(TestCase::HealthCheck, 3, "connection refused");
        assert!(!result.passed());
    }

    #[test]
    fn test_run_summary() {
        let results = vec![
            TestResult::pass(TestCase::HealthCheck, 100),
            TestResult::fail(TestCase::CorsConfiguration, 50, "missing header"),
            TestResult::error(TestCase::InvalidEndpoint, 5, "connection refused"),
        ];

        let summary = RunSummary::new(Utc::now(), "http://localhost:8001", results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total_duration_ms, 155);
        assert!(!summary.is_all_passed());
    }

    #[test]
    fn test_all_passed() {
        let results = TestCase::all()
            .into_iter()
            .map(|case| TestResult::pass(case, 1))
            .collect();
        let summary = RunSummary::new(Utc::now(), "http://localhost:8001", results);
        assert!(summary.is_all_passed());
        assert_eq!(summary.pass_rate(), 100.0);
    }
}
