//! REST client for the admin resources.

use log::{debug, warn};
use thiserror::Error;

use crate::{
    BusinessConfig,
    entities::{Entity, Ingested, ingest},
    http::{Client, HttpError},
    session::Session,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },
    #[error("Not authorized, log in again")]
    Unauthorized,
    #[error("Server answered {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Lists admin resources, authenticating with the session token when present.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: BusinessConfig,
    session: Session,
}

impl ApiClient {
    pub fn new(config: BusinessConfig, session: Session) -> Self {
        Self { config, session }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resource_url<E: Entity>(&self) -> String {
        format!("{}/{}", self.config.api_url(), E::RESOURCE)
    }

    /// `GET {api}/{resource}`, decoded and validated.
    pub async fn list<E: Entity>(&self) -> Result<Ingested<E>, ApiError> {
        let url = self.resource_url::<E>();
        let mut request = Client::get(&url)
            .header("accept", "application/json")
            .timeout(self.config.request_timeout());
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(&token);
        } else {
            debug!("requesting {url} without a session token");
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        match response.status {
            401 => {
                warn!("{url} rejected the session token");
                Err(ApiError::Unauthorized)
            }
            status if !response.is_success() => Err(ApiError::Status {
                url,
                status,
                body: response.text(),
            }),
            _ => ingest::<E>(&response.body).map_err(|source| ApiError::Decode { url, source }),
        }
    }
}
