#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use macroseries_core::{SeriesError, SourceConfig};
use url::Url;

use crate::SOURCE_NAME;

/// HTTP transport abstraction (so we can inject canned payloads in tests).
#[async_trait]
pub trait ImfTransport: Send + Sync {
    /// GET `url` and return the response body of a successful (2xx) response.
    async fn fetch_body(&self, url: &Url) -> Result<String, SeriesError>;
}

/// Production transport backed by a shared `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    client: reqwest::Client,
}

impl RealAdapter {
    /// Build a client honoring the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the client cannot be built (e.g. an invalid user agent).
    pub fn from_config(cfg: &SourceConfig) -> Result<Self, SeriesError> {
        let mut builder = reqwest::Client::builder().timeout(cfg.timeout());
        if let Some(ua) = &cfg.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        let client = builder
            .build()
            .map_err(|e| SeriesError::InvalidArg(format!("http client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_reqwest_err(e: &reqwest::Error, context: &str) -> SeriesError {
    if e.is_timeout() {
        return SeriesError::source_timeout(SOURCE_NAME);
    }
    if let Some(status) = e.status() {
        return SeriesError::source(SOURCE_NAME, format!("status {status}: {context}"));
    }
    SeriesError::source(SOURCE_NAME, format!("{context}: {e}"))
}

#[async_trait]
impl ImfTransport for RealAdapter {
    async fn fetch_body(&self, url: &Url) -> Result<String, SeriesError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e, url.as_str()))?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SeriesError::not_found(url.to_string()));
        }
        if !status.is_success() {
            return Err(SeriesError::source(
                SOURCE_NAME,
                format!("status {status}: {url}"),
            ));
        }
        resp.text()
            .await
            .map_err(|e| map_reqwest_err(&e, url.as_str()))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn ImfTransport {
    /// Test helper that builds an `ImfTransport` from a closure receiving the request URL.
    pub fn from_fn<F>(f: F) -> Arc<dyn ImfTransport>
    where
        F: Send + Sync + 'static + Fn(&Url) -> Result<String, SeriesError>,
    {
        struct FnTransport<F>(F);

        #[async_trait]
        impl<F> ImfTransport for FnTransport<F>
        where
            F: Send + Sync + 'static + Fn(&Url) -> Result<String, SeriesError>,
        {
            async fn fetch_body(&self, url: &Url) -> Result<String, SeriesError> {
                (self.0)(url)
            }
        }

        Arc::new(FnTransport(f))
    }

    /// Test helper that always answers with the same body.
    pub fn fixed(body: impl Into<String>) -> Arc<dyn ImfTransport> {
        let body = body.into();
        <dyn ImfTransport>::from_fn(move |_| Ok(body.clone()))
    }
}
