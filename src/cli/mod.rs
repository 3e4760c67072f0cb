//! CLI argument parsing
//!
//! Defines command-line interface using clap. Every flag is optional;
//! running with none checks the backend named in `frontend/.env`.

use clap::Parser;
use std::path::PathBuf;

/// Sequential conformance checker for the backend API
#[derive(Parser, Debug)]
#[command(name = "backend-smoke")]
#[command(author = "hephaex@gmail.com")]
#[command(version = "0.1.0")]
#[command(about = "Run the backend API smoke checks in order and report pass/fail")]
#[command(long_about = None)]
pub struct Args {
    /// Env file holding the backend URL
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Key of the backend URL line in the env file
    #[arg(long)]
    pub key: Option<String>,

    /// Backend base URL; skips the env file when given
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Text the docs page must contain, case-insensitive (default: swagger)
    #[arg(long)]
    pub docs_marker: Option<String>,

    /// Run only these test numbers (1-5); may be repeated
    #[arg(short, long = "test", value_parser = clap::value_parser!(u8).range(1..=5))]
    pub tests: Vec<u8>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write a report to this file (.json or .csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable ANSI colors in the summary
    #[arg(long)]
    pub no_color: bool,

    /// List the test cases and exit
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
