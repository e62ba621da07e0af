//! macroseries-mock
//!
//! In-memory `DataSource` implementations for tests, CI and offline CLI runs.
//!
//! - [`MockSource`] generates deterministic fixture data per indicator.
//! - [`DynamicMockSource`] defers every answer to a test-side controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use macroseries_core::{
    DataSource, Frequency, RawObservation, SeriesError, SeriesRequest, SourceKey,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::INDICATORS;

const NAME: &str = "macroseries-mock";

/// Mock source for CI-safe runs. Provides deterministic data from generated fixtures.
///
/// Special country codes drive failure paths:
/// - `FAIL` returns a source error.
/// - `TIMEOUT` sleeps briefly before answering; callers with a tight timeout give up.
#[derive(Debug, Default, Clone)]
pub struct MockSource {
    calls: Arc<AtomicUsize>,
    latency: Option<Duration>,
}

impl MockSource {
    /// Static key for logs and error attribution.
    pub const KEY: SourceKey = SourceKey::new(NAME);

    /// Create a mock answering immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of `observations` calls served so far, across clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn maybe_fail_or_delay(&self, req: &SeriesRequest) -> Result<(), SeriesError> {
        match req.country() {
            "FAIL" => Err(SeriesError::source(
                NAME,
                format!("forced failure: {}", req.key()),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => {
                if let Some(d) = self.latency {
                    tokio::time::sleep(d).await;
                }
                Ok(())
            }
        }
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supported_frequencies(&self) -> &'static [Frequency] {
        &Frequency::CONCRETE
    }

    async fn observations(
        &self,
        req: &SeriesRequest,
    ) -> Result<Vec<RawObservation>, SeriesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_delay(req).await?;
        fixtures::by_request(req)
            .ok_or_else(|| SeriesError::not_found(format!("{}/{}", req.database(), req.key())))
    }
}
