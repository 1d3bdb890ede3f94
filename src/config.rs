//! User configuration.
//!
//! A small JSON file; every key is optional. The default location is only
//! read if it exists, while an explicit `--config` path must be readable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{FormKind, OutputFormat};

/// Config filename within the config directory.
const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Form used when a command doesn't name one.
    pub default_form: FormKind,
    /// Report format used when a command doesn't name one.
    pub format: OutputFormat,
    /// Log filter directive (e.g. "debug") used when RUST_LOG is unset.
    pub log_filter: Option<String>,
}

/// Returns the default config path.
///
/// On Linux: ~/.config/purchase-costs/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("purchase-costs")
        .join(CONFIG_FILENAME)
}

/// Load configuration.
///
/// With `explicit` set, that file must exist and parse. Without it, the
/// default path is tried and a missing file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                read_config(&path)
            } else {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================
