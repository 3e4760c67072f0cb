//! Output formatting and report export
//!
//! Console rendering of a run plus JSON/CSV report files.

mod formatter;
mod report;

pub use formatter::{OutputFormat, ResultFormatter};
pub use report::export_summary;
