//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "BACKEND_SMOKE";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from BACKEND_SMOKE_BASE_URL
    pub base_url: Option<String>,
    /// Env file path from BACKEND_SMOKE_ENV_FILE
    pub env_file: Option<String>,
    /// URL key from BACKEND_SMOKE_KEY
    pub key: Option<String>,
    /// Docs page marker from BACKEND_SMOKE_DOCS_MARKER
    pub docs_marker: Option<String>,
    /// Output format from BACKEND_SMOKE_FORMAT
    pub format: Option<String>,
    /// Timeout from BACKEND_SMOKE_TIMEOUT
    pub timeout: Option<u64>,
    /// Verbose from BACKEND_SMOKE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            env_file: get_env("ENV_FILE"),
            key: get_env("KEY"),
            docs_marker: get_env("DOCS_MARKER"),
            format: get_env("FORMAT"),
            timeout: get_env_parse("TIMEOUT"),
            verbose: get_env_bool("VERBOSE"),
        }
    }
}

/// Get environment variable with prefix; empty values count as unset
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all BACKEND_SMOKE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_BASE_URL      Backend base URL (skips the env file)");
    println!("  {ENV_PREFIX}_ENV_FILE      Path to the env file holding the URL");
    println!("  {ENV_PREFIX}_KEY           Key of the URL line in the env file");
    println!("  {ENV_PREFIX}_DOCS_MARKER   Text the docs page must contain (default: swagger)");
    println!("  {ENV_PREFIX}_FORMAT        Output format (table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_TIMEOUT       Per-request timeout in seconds");
    println!("  {ENV_PREFIX}_VERBOSE       Enable debug logging (true/false)");
    println!();
}

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_{name}"), value.into()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
    }

    // Both env-mutating cases share one test so they never race each other.
    #[test]
    fn test_env_builder() {
        {
            let _guard = EnvBuilder::new()
                .var("BASE_URL", "http://10.0.0.1:8001")
                .var("TIMEOUT", "15")
                .var("VERBOSE", "yes")
                .apply_scoped();

            let config = EnvConfig::load();
            assert_eq!(config.base_url, Some("http://10.0.0.1:8001".to_string()));
            assert_eq!(config.timeout, Some(15));
            assert_eq!(config.verbose, Some(true));
        }

        {
            let _guard = EnvBuilder::new()
                .var("BASE_URL", "  ")
                .var("TIMEOUT", "soon")
                .apply_scoped();

            let config = EnvConfig::load();
            assert!(config.base_url.is_none());
            assert!(config.timeout.is_none());
        }
    }
}
