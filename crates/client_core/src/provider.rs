//! Rover data collaborator and its HTTP implementation against the proxy server.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::protocol::{ManifestEnvelope, Photo, RoverManifest};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid provider url '{0}'")]
    InvalidUrl(String),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("malformed payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait RoverDataProvider: Send + Sync {
    async fn manifest(&self, rover: &str) -> Result<RoverManifest, ProviderError>;
    async fn photos(&self, rover: &str, date: &str) -> Result<Vec<Photo>, ProviderError>;
}

/// Talks to the proxy server's `/{rover}` and `/rover-images/{rover}/{date}` routes.
#[derive(Debug, Clone)]
pub struct HttpRoverProvider {
    http: Client,
    base_url: Url,
}

impl HttpRoverProvider {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ProviderError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ProviderError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| ProviderError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl RoverDataProvider for HttpRoverProvider {
    async fn manifest(&self, rover: &str) -> Result<RoverManifest, ProviderError> {
        let url = self.endpoint(&[rover])?;
        let envelope: ManifestEnvelope = self.get_json(url).await?;
        Ok(envelope.photo_manifest)
    }

    async fn photos(&self, rover: &str, date: &str) -> Result<Vec<Photo>, ProviderError> {
        let url = self.endpoint(&["rover-images", rover, date])?;
        self.get_json(url).await
    }
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
