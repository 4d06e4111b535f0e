//! Configuration file handling for the CLI.
//!
//! Lives in `$XDG_CONFIG_HOME/camps/config.toml` on Linux. Every field is
//! optional; environment variables read by `BusinessConfig` take precedence
//! over the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub table: TableSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Backend root, e.g. `https://camps.example.org`
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSection {
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Where the session JSON is kept
    pub file: Option<PathBuf>,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "camps", "camps").context("Failed to determine config directory")
}

impl CliConfig {
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Loads `path`, or the default location. A missing file is an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session.file {
            Some(file) => Ok(file.clone()),
            None => Ok(project_dirs()?.data_dir().join("session.json")),
        }
    }
}
