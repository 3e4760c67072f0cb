//! backend-smoke - sequential conformance checker for the backend API
//!
//! Resolves the backend URL from the frontend's `.env` file, runs five
//! checks one after another and prints a pass/fail summary.
//!
//! ## Checks
//!
//! 1. Health Check - `GET /api/` answers `{"message": "Hello World"}`
//! 2. CORS Configuration - `OPTIONS /api/` preflight carries the CORS headers
//! 3. Invalid Endpoint - unknown paths answer 404 with a `detail` field
//! 4. Status Endpoint - a created status check shows up in the listing
//! 5. API Documentation - `GET /docs` serves the Swagger UI page
//!
//! ## Usage
//!
//! ```bash
//! # Check the backend named by REACT_APP_BACKEND_URL in frontend/.env
//! backend-smoke
//!
//! # Check an explicit backend, only the status round trip
//! backend-smoke --base-url http://localhost:8001 --test 4
//!
//! # Save a CSV report
//! backend-smoke --output results.csv
//! ```
//!
//! Exit code is 0 when every check passes, 1 when any fails and 2 when the
//! backend URL cannot be resolved.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

mod checks;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{print_env_help, AppConfig, EnvConfig, Settings};
use executor::ConformanceRunner;
use models::TestCase;
use output::{export_summary, ResultFormatter};
use utils::{init_logger, LogLevel};

/// Exit code when the backend URL cannot be resolved
const EXIT_CONFIG: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let app = AppConfig::from_sources(&args, &EnvConfig::load())?;

    init_logger(LogLevel::from_verbose(app.verbose));

    let mut formatter = ResultFormatter::new(app.format);
    if !app.colorize {
        formatter = formatter.no_color();
    }

    if args.list {
        println!("{}", formatter.format_case_list(&TestCase::all()));
        print_env_help();
        return Ok(ExitCode::SUCCESS);
    }

    let settings = match Settings::resolve(&app) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::from(EXIT_CONFIG));
        }
    };

    let selected = args
        .tests
        .iter()
        .filter_map(|&n| TestCase::from_number(n))
        .collect();

    let runner = ConformanceRunner::new(settings, app.timeout_secs)?.with_tests(selected);
    let summary = runner.run_all().await;

    println!("{}", formatter.format_summary(&summary));

    let mut success = summary.is_all_passed();

    if let Some(path) = &app.output {
        if let Err(e) = export_summary(&summary, path) {
            error!("Failed to write report: {:#}", e);
            success = false;
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
