//! macroseries-imf
//!
//! Public connector that implements `DataSource` on top of the IMF SDMX-JSON
//! `CompactData` service. One request fetches one series:
//!
//! ```text
//! {base}/{database}/{FREQ}.{COUNTRY}.{INDICATOR}.?startPeriod={start}&endPeriod={end}
//! ```
#![warn(missing_docs)]

/// Transport definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// `CompactData` payload extraction.
pub mod parse;

use std::sync::Arc;

use adapter::{ImfTransport, RealAdapter};
use async_trait::async_trait;
use macroseries_core::{
    DataSource, Frequency, RawObservation, SeriesError, SeriesRequest, SourceConfig, SourceKey,
};
use url::Url;

pub(crate) const SOURCE_NAME: &str = "macroseries-imf";

#[cfg(feature = "test-adapters")]
type TransportArc = Arc<dyn ImfTransport>;
#[cfg(not(feature = "test-adapters"))]
type TransportArc = Arc<RealAdapter>;

/// Public connector type. Production users will construct with `ImfConnector::new_default()`.
pub struct ImfConnector {
    transport: TransportArc,
    base_url: Url,
}

impl ImfConnector {
    /// Static connector key for logs and error attribution.
    pub const KEY: SourceKey = SourceKey::new(SOURCE_NAME);

    /// Build against the public IMF endpoint with default settings.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, SeriesError> {
        Self::from_config(&SourceConfig::default())
    }

    /// Build from connection settings.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` does not parse or the HTTP client cannot be built.
    pub fn from_config(cfg: &SourceConfig) -> Result<Self, SeriesError> {
        let base_url = parse_base(&cfg.base_url)?;
        let adapter = RealAdapter::from_config(cfg)?;
        Ok(Self {
            transport: Arc::new(adapter),
            base_url,
        })
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` does not parse.
    #[cfg(feature = "test-adapters")]
    pub fn with_transport(
        transport: Arc<dyn ImfTransport>,
        base_url: &str,
    ) -> Result<Self, SeriesError> {
        Ok(Self {
            transport,
            base_url: parse_base(base_url)?,
        })
    }

    /// Service root every request URL is built from.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request URL for `req`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the base URL cannot carry path segments.
    pub fn build_url(&self, req: &SeriesRequest) -> Result<Url, SeriesError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SeriesError::InvalidArg(format!("base url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(req.database())
            .push(&format!("{}.", req.key()));
        url.query_pairs_mut()
            .append_pair("startPeriod", &req.start_year().to_string())
            .append_pair("endPeriod", &req.end_year().to_string());
        Ok(url)
    }

    fn normalize_error(e: SeriesError, what: &str) -> SeriesError {
        match e {
            SeriesError::NotFound { .. } => SeriesError::not_found(what),
            e if e.is_source_error() => e,
            other => SeriesError::source(SOURCE_NAME, other.to_string()),
        }
    }
}

fn parse_base(base: &str) -> Result<Url, SeriesError> {
    Url::parse(base).map_err(|e| SeriesError::InvalidArg(format!("invalid base url {base:?}: {e}")))
}

#[async_trait]
impl DataSource for ImfConnector {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn supported_frequencies(&self) -> &'static [Frequency] {
        &Frequency::CONCRETE
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macroseries_imf::observations",
            skip(self, req),
            fields(key = %req.key(), database = req.database()),
        )
    )]
    async fn observations(
        &self,
        req: &SeriesRequest,
    ) -> Result<Vec<RawObservation>, SeriesError> {
        let what = format!("{}/{}", req.database(), req.key());
        let url = self.build_url(req)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "requesting series");
        let body = self
            .transport
            .fetch_body(&url)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        let records =
            parse::parse_compact_data(&body, &what).map_err(|e| Self::normalize_error(e, &what))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(records = records.len(), "received records");
        Ok(records)
    }
}
