//! CLI preferences stored in `{data_dir}/config.yaml`
//!
//! ```yaml
//! horizonAge: 95
//! strictBuckets: false
//! format: table
//! ```
//!
//! Every key is optional; command-line flags win over the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::LoadError;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Age the default projection window runs to
pub const DEFAULT_HORIZON_AGE: u8 = 95;

/// How reports are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    pub horizon_age: u8,
    /// Fail instead of skipping years no bucket covers
    pub strict_buckets: bool,
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            horizon_age: DEFAULT_HORIZON_AGE,
            strict_buckets: false,
            format: OutputFormat::Table,
        }
    }
}

impl CliConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Load `config.yaml` from `data_dir`, falling back to defaults when absent
    pub fn load(data_dir: &Path) -> Result<Self, LoadError> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_yaml(&content).map_err(|e| LoadError::Parse {
            path,
            message: e.to_string(),
        })
    }
}

/// `~/.forecast`, or `./.forecast` when there is no home directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".forecast")
}
