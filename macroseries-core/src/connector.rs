use async_trait::async_trait;

use crate::{Frequency, RawObservation, SeriesError, SeriesRequest};

/// Typed key for identifying data sources in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceKey(pub &'static str);

impl SourceKey {
    /// Construct a new typed source key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// A provider of raw `(period, value)` records for one series.
///
/// Implementations own transport, authentication and payload parsing; the
/// core only sees `RawObservation`s and typed errors.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Stable source name, e.g. "macroseries-imf".
    fn name(&self) -> &'static str;

    /// Typed key derived from [`Self::name`].
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// REQUIRED: native frequencies this source can be queried in.
    fn supported_frequencies(&self) -> &'static [Frequency];

    /// Fetch raw records for the request, in the order the source reports them.
    ///
    /// Records with a missing period or value are passed through; the core
    /// decides what to skip.
    async fn observations(&self, req: &SeriesRequest)
    -> Result<Vec<RawObservation>, SeriesError>;
}
