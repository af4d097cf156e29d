//! Configuration for report runs

use crate::record::Category;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the API access token
pub const TOKEN_ENV_VAR: &str = "SMARTSHEET_ACCESS_TOKEN";

/// Main report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// API access token; the environment variable and CLI flag take precedence
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub nebs: NebsConfig,
    #[serde(default)]
    pub sg: SgConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Workspaces walked for a category
    pub fn workspace_ids(&self, category: Category) -> &[u64] {
        match category {
            Category::Nebs => &self.nebs.workspace_ids,
            Category::Sg => &self.sg.workspace_ids,
        }
    }

    /// Check that a run of `category` has everything it needs.
    ///
    /// An empty workspace list is valid and yields a header-only report.
    pub fn validate_for(&self, category: Category) -> Result<()> {
        if category == Category::Nebs && self.nebs.reference_sheet_id.is_none() {
            anyhow::bail!("Configuration error: [nebs] reference_sheet_id is required for NEBS runs");
        }

        Ok(())
    }

    /// Pick the access token: CLI flag, then environment, then file
    pub fn resolve_token(&self, cli_token: Option<&str>, env_token: Option<&str>) -> Option<String> {
        cli_token
            .or(env_token)
            .or(self.access_token.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout_seconds(),
            output_dir: default_output_dir(),
            nebs: NebsConfig::default(),
            sg: SgConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

/// NEBS run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NebsConfig {
    /// Master status sheet listing every NEBS project
    #[serde(default)]
    pub reference_sheet_id: Option<u64>,
    #[serde(default)]
    pub workspace_ids: Vec<u64>,
}

/// SG run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SgConfig {
    #[serde(default)]
    pub workspace_ids: Vec<u64>,
}

/// Write-back target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub sheet_id: Option<u64>,
}

fn default_api_base_url() -> String {
    "https://api.smartsheet.com/2.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Results")
}
