//! Output formatters for conformance results
//!
//! Provides Table, JSON, and one-line summary output formats.

use crate::models::{RunSummary, TestCase, TestResult, TestStatus};

const RULE_WIDTH: usize = 50;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// One line per case: `Health Check: ✅ PASSED`
    pub fn format_result(&self, result: &TestResult) -> String {
        let status_str = match (result.status, self.colorize) {
            (TestStatus::Pass, true) => "\x1b[32m✅ PASSED\x1b[0m",
            (TestStatus::Pass, false) => "✅ PASSED",
            (_, true) => "\x1b[31m❌ FAILED\x1b[0m",
            (_, false) => "❌ FAILED",
        };

        let mut line = format!("{}: {}", result.test_case.name(), status_str);
        if let Some(msg) = result.message.as_deref().filter(|_| !result.passed()) {
            line.push_str(&format!("\n    {msg}"));
        }
        line
    }

    /// Format the whole run
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        output.push_str(&format!("\n{rule}\nTEST RESULTS SUMMARY\n{rule}\n"));

        for result in &summary.results {
            output.push_str(&self.format_result(result));
            output.push('\n');
        }

        output.push_str(&format!(
            "\nTotal: {} | Pass: {} | Fail: {} | Error: {} | Duration: {}ms\n",
            summary.total,
            summary.passed,
            summary.failed,
            summary.errors,
            summary.total_duration_ms
        ));

        output.push_str(&format!("\n{rule}\n"));
        output.push_str(&self.format_verdict(summary));
        output.push('\n');

        output
    }

    fn format_verdict(&self, summary: &RunSummary) -> String {
        let (text, color) = if summary.is_all_passed() {
            (
                "🎉 ALL TESTS PASSED! Backend API is working correctly.",
                "\x1b[32m",
            )
        } else {
            ("❌ SOME TESTS FAILED. See details above.", "\x1b[31m")
        };

        if self.colorize {
            format!("{color}{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%) in {}ms",
            summary.base_url,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }

    /// Table of the available test cases, for `--list`
    pub fn format_case_list(&self, cases: &[TestCase]) -> String {
        let mut output = format!("\nBackend API Test Cases ({} total)\n\n", cases.len());
        for case in cases {
            output.push_str(&format!(
                "  {}. {:20} {}\n",
                case.number(),
                case.name(),
                case.description()
            ));
        }
        output
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(results: Vec<TestResult>) -> RunSummary {
        RunSummary::new(Utc::now(), "http://localhost:8001", results)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_format_result() {
        let formatter = ResultFormatter::default().no_color();

        let passed = TestResult::pass(TestCase::HealthCheck, 100);
        assert_eq!(formatter.format_result(&passed), "Health Check: ✅ PASSED");

        let failed = TestResult::fail(TestCase::CorsConfiguration, 3, "Missing header");
        let line = formatter.format_result(&failed);
        assert!(line.starts_with("CORS Configuration: ❌ FAILED"));
        assert!(line.contains("Missing header"));
    }

    #[test]
    fn test_table_all_passed_banner() {
        let results = TestCase::all()
            .into_iter()
            .map(|case| TestResult::pass(case, 1))
            .collect();
        let output = ResultFormatter::default()
            .no_color()
            .format_summary(&summary(results));

        assert!(output.contains("TEST RESULTS SUMMARY"));
        assert!(output.contains("🎉 ALL TESTS PASSED!"));
        assert!(!output.contains("SOME TESTS FAILED"));
    }

    #[test]
    fn test_table_failure_banner() {
        let results = vec![
            TestResult::pass(TestCase::HealthCheck, 1),
            TestResult::error(TestCase::StatusEndpoint, 1, "Connection refused"),
        ];
        let output = ResultFormatter::default()
            .no_color()
            .format_summary(&summary(results));

        assert!(output.contains("Status Endpoint: ❌ FAILED"));
        assert!(output.contains("❌ SOME TESTS FAILED. See details above."));
    }

    #[test]
    fn test_json_summary() {
        let results = vec![TestResult::pass(TestCase::HealthCheck, 1)];
        let output = ResultFormatter::new(OutputFormat::Json).format_summary(&summary(results));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["passed"], 1);
        assert_eq!(value["results"][0]["test_case"], "health_check");
        assert_eq!(value["results"][0]["status"], "pass");
    }

    #[test]
    fn test_case_list() {
        let output = ResultFormatter::default().format_case_list(&TestCase::all());
        assert!(output.contains("5 total"));
        assert!(output.contains("5. API Documentation"));
    }
}
