use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::protocol::{ManifestEnvelope, Photo, PhotosEnvelope};
use thiserror::Error;
use url::Url;

use crate::config::DATE_FORMAT;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
    #[error("upstream request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("upstream {path} responded with status {status}")]
    Status { path: String, status: StatusCode },
    #[error("malformed upstream payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the NASA Mars Photos API.
///
/// Errors carry the request path only; full URLs hold the API key.
#[derive(Clone)]
pub struct NasaClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl NasaClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub(crate) fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .extend_pairs(query)
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        let path = url.path().to_string();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.clone(),
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { path, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.clone(),
                source: source.without_url(),
            })?;
        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { path, source })
    }

    pub async fn manifest(
        &self,
        rover: &str,
        max_date: NaiveDate,
    ) -> Result<ManifestEnvelope, UpstreamError> {
        let max_date = max_date.format(DATE_FORMAT).to_string();
        let url = self.endpoint(&["manifests", rover], &[("max_date", max_date.as_str())])?;
        self.get_json(url).await
    }

    pub async fn photos(&self, rover: &str, date: NaiveDate) -> Result<Vec<Photo>, UpstreamError> {
        let earth_date = date.format(DATE_FORMAT).to_string();
        let url = self.endpoint(
            &["rovers", rover, "photos"],
            &[("earth_date", earth_date.as_str())],
        )?;
        let envelope: PhotosEnvelope = self.get_json(url).await?;
        Ok(envelope.photos)
    }
}
