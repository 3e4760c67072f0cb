//! Base URL resolution from a dotenv-style file
//!
//! The backend address lives in the frontend's `.env` file as a
//! `KEY=VALUE` line. Only the first line for the key counts. The file is
//! parsed with `dotenv` but never loaded into the process environment.

use std::path::Path;
use tracing::debug;

use super::ConfigError;

/// Default location of the env file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = "frontend/.env";

/// Default key holding the backend URL
pub const DEFAULT_URL_KEY: &str = "REACT_APP_BACKEND_URL";

/// Read the env file at `path` and extract the value for `key`
///
/// Lines dotenv cannot parse are skipped. An empty value counts as a
/// missing key.
pub fn read_base_url(path: &Path, key: &str) -> Result<String, ConfigError> {
    let unreadable = |source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let entries = dotenv::from_path_iter(path).map_err(|e| match e {
        dotenv::Error::Io(source) => unreadable(source),
        other => unreadable(std::io::Error::new(std::io::ErrorKind::Other, other.to_string())),
    })?;

    for entry in entries {
        match entry {
            Ok((name, value)) if name == key => {
                let value = value.trim();
                if value.is_empty() {
                    break;
                }
                return Ok(value.to_string());
            }
            Ok(_) => {}
            Err(dotenv::Error::Io(source)) => return Err(unreadable(source)),
            Err(e) => debug!("Skipping line in {}: {}", path.display(), e),
        }
    }

    Err(ConfigError::KeyNotFound {
        key: key.to_string(),
        path: path.to_path_buf(),
    })
}
