//! Everything a command needs: merged configuration, the persisted session
//! and an API client over both.

use std::{collections::BTreeMap, path::Path, sync::Arc};

use anyhow::{Context as _, Result};
use camps_business::{ApiClient, BusinessConfig, FileSessionStore, Session, config::ENV_PREFIX};
use tracing::debug;

use crate::config::CliConfig;

pub struct AppContext {
    pub config: BusinessConfig,
    pub session: Session,
    pub client: ApiClient,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = CliConfig::load(config_path)?;
        Self::from_parts(&file, std::env::vars())
    }

    /// Builds the context from a config file and environment variables.
    /// A `CAMPS_*` variable overrides the matching file setting.
    pub fn from_parts(
        file: &CliConfig,
        env: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let config = business_config(file, env)?;

        let session_path = file.session_path()?;
        debug!(path = %session_path.display(), "opening session");
        let store = FileSessionStore::open(session_path).context("Failed to open session")?;
        let session = Session::new(Arc::new(store));

        let client = ApiClient::new(config.clone(), session.clone());
        Ok(Self {
            config,
            session,
            client,
        })
    }
}

fn business_config(
    file: &CliConfig,
    env: impl IntoIterator<Item = (String, String)>,
) -> Result<BusinessConfig> {
    let mut vars = BTreeMap::new();
    if let Some(url) = &file.api.base_url {
        vars.insert(format!("{ENV_PREFIX}API_BASE_URL"), url.clone());
    }
    if let Some(size) = file.table.page_size {
        vars.insert(format!("{ENV_PREFIX}PAGE_SIZE"), size.to_string());
    }
    vars.extend(env);

    BusinessConfig::from_vars(vars).context("Invalid configuration")
}
