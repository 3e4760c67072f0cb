//! Data models for conformance runs
//!
//! This module contains all data structures used throughout the application.

mod status_check;
mod test_result;

pub use status_check::{StatusCheck, StatusCheckCreate};
pub use test_result::{RunSummary, TestCase, TestResult, TestStatus};
