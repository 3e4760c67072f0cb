//! Test execution engine
//!
//! Provides sequential execution of the conformance checks.

mod runner;

pub use runner::ConformanceRunner;
