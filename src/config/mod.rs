//! Configuration module
//!
//! Resolves the backend base URL once at startup and merges command-line
//! flags with `BACKEND_SMOKE_*` environment overrides.

mod env;
mod env_file;

pub use env::{print_env_help, EnvConfig};
use env_file::{read_base_url, DEFAULT_ENV_FILE, DEFAULT_URL_KEY};

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::cli::Args;
use crate::output::OutputFormat;

/// Fatal configuration errors; nothing runs when one of these occurs
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find {key} in {}", path.display())]
    KeyNotFound { key: String, path: PathBuf },
}

/// Marker the docs page must contain, matched case-insensitively
pub const DEFAULT_DOCS_MARKER: &str = "swagger";

/// Resolved target of a conformance run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    base_url: String,
    docs_marker: String,
}

impl Settings {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            docs_marker: DEFAULT_DOCS_MARKER.to_string(),
        }
    }

    pub fn with_docs_marker(mut self, marker: impl Into<String>) -> Self {
        self.docs_marker = marker.into();
        self
    }

    /// Resolve from an explicit URL, falling back to the env file
    pub fn resolve(app: &AppConfig) -> Result<Self, ConfigError> {
        let settings = match &app.base_url {
            Some(url) => {
                debug!("Using base URL override");
                Self::new(url.as_str())
            }
            None => {
                debug!("Reading {} from {}", app.url_key, app.env_file.display());
                Self::new(read_base_url(&app.env_file, &app.url_key)?)
            }
        };

        Ok(settings.with_docs_marker(app.docs_marker.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prefix of every functional endpoint
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Full URL of an endpoint under the API prefix
    pub fn api_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url(), path)
    }

    /// Documentation page, served outside the API prefix
    pub fn docs_url(&self) -> String {
        format!("{}/docs", self.base_url)
    }

    pub fn docs_marker(&self) -> &str {
        &self.docs_marker
    }
}

/// Application configuration after merging flags and environment
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub env_file: PathBuf,
    pub url_key: String,
    pub base_url: Option<String>,
    pub docs_marker: String,
    pub format: OutputFormat,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
    pub colorize: bool,
    pub output: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            url_key: DEFAULT_URL_KEY.to_string(),
            base_url: None,
            docs_marker: DEFAULT_DOCS_MARKER.to_string(),
            format: OutputFormat::Table,
            timeout_secs: None,
            verbose: false,
            colorize: true,
            output: None,
        }
    }
}

impl AppConfig {
    /// Flags win over environment variables, which win over defaults
    pub fn from_sources(args: &Args, env: &EnvConfig) -> Result<Self> {
        let defaults = Self::default();

        let format = match args.format.as_deref().or(env.format.as_deref()) {
            Some(name) => OutputFormat::from_str(name).ok_or_else(|| {
                anyhow!("Unknown output format '{name}' (expected table, json, json-pretty or summary)")
            })?,
            None => defaults.format,
        };

        Ok(Self {
            env_file: args
                .env_file
                .clone()
                .or_else(|| env.env_file.as_ref().map(PathBuf::from))
                .unwrap_or(defaults.env_file),
            url_key: args
                .key
                .clone()
                .or_else(|| env.key.clone())
                .unwrap_or(defaults.url_key),
            base_url: args
                .base_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .or_else(|| env.base_url.clone()),
            docs_marker: args
                .docs_marker
                .clone()
                .or_else(|| env.docs_marker.clone())
                .unwrap_or(defaults.docs_marker),
            format,
            timeout_secs: args.timeout.or(env.timeout),
            verbose: args.verbose || env.verbose.unwrap_or(false),
            colorize: !args.no_color,
            output: args.output.clone(),
        })
    }
}
