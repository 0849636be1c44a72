//! HTTP adapter for the random user API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::UpstreamError,
    protocol::{RandomUserResponse, RawProfile},
};
use tracing::{debug, info};
use url::Url;

use crate::{config::ClientSettings, error::FetchError, types::BatchSize, ProfileSource};

pub struct RandomUserClient {
    http: Client,
    endpoint: Url,
}

impl RandomUserClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_http_client(Client::new(), endpoint)
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build random user http client")?;
        Self::with_http_client(http, &settings.endpoint)
    }

    pub fn with_http_client(http: Client, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim())
            .with_context(|| format!("invalid random user endpoint '{endpoint}'"))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint with `results=<count>`, replacing any `results` pair already configured.
    pub fn request_url(&self, count: BatchSize) -> Url {
        let mut url = self.endpoint.clone();
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "results")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &retained {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("results", &count.get().to_string());
        }
        url
    }

    /// Downloads raw picture bytes for a profile card.
    pub async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: None,
            });
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ProfileSource for RandomUserClient {
    async fn fetch_profiles(&self, count: BatchSize) -> Result<Vec<RawProfile>, FetchError> {
        let url = self.request_url(count);
        debug!(%url, "requesting random user batch");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: UpstreamError::from_body(&body).map(|err| err.error),
            });
        }

        let decoded: RandomUserResponse =
            serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))?;
        info!(
            requested = count.get(),
            received = decoded.results.len(),
            "random user batch received"
        );
        Ok(decoded.results)
    }
}
