use std::time::Duration;

use log::info;
use serde::Deserialize;
use thiserror::Error;
use ustr::Ustr;

use crate::table::DEFAULT_PAGE_SIZE;

pub const ENV_PREFIX: &str = "CAMPS_";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("CAMPS_PAGE_SIZE must be greater than zero")]
    ZeroPageSize,
    #[error("CAMPS_API_BASE_URL must start with http:// or https://, got `{0}`")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    page_size: Option<usize>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl BusinessConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `CAMPS_API_BASE_URL`, `CAMPS_PAGE_SIZE` and
    /// `CAMPS_REQUEST_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_owned(), value.as_ref().to_owned()))
            })
            .collect();
        let raw: RawConfig = serde_env::from_iter(scoped)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            api_base_url,
            page_size,
            request_timeout_secs,
        } = raw;

        let api_base_url = match api_base_url {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_owned();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(url));
                }
                url
            }
            None => {
                info!("CAMPS_API_BASE_URL not set, defaulting to {DEFAULT_API_BASE_URL}");
                DEFAULT_API_BASE_URL.to_owned()
            }
        };

        let page_size = match page_size {
            Some(0) => return Err(ConfigError::ZeroPageSize),
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url,
            page_size,
            request_timeout_secs: request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    pub fn api_url(&self) -> Ustr {
        Ustr::from(&format!("{}/api", self.api_base_url))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
