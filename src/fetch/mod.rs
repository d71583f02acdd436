//! The single network request whose result colors the shape.
//!
//! A [`Fetcher`] always settles with a [`FetchOutcome`]; failures are values,
//! never errors returned to the caller.

use reqwest::{Client, Url};
use std::future::Future;

use crate::models::{FetchError, FetchOutcome};

/// Issues one request and reports how it settled.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome>;
}

/// GET over HTTP with `reqwest`. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Option<Url>,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    /// Resolve relative targets against `base`.
    pub fn with_base_url(base: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base).map_err(|e| FetchError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url: Some(base_url),
        })
    }

    /// Use a preconfigured client (timeouts, proxies, TLS).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(e) => match &self.base_url {
                Some(base) => base.join(url).map_err(|e| FetchError::InvalidUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                }),
                None => Err(FetchError::InvalidUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                }),
            },
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let url = self.resolve(url)?;
        tracing::debug!(%url, "sending GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(FetchError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.get_text(url).await {
            Ok(body) => {
                tracing::info!(url, body = %body.trim(), "request completed");
                FetchOutcome::Completed(body)
            }
            Err(e) => {
                tracing::warn!(url, "request failed: {}", e);
                FetchOutcome::Failed(e)
            }
        }
    }
}
