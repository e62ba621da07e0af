use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the macroseries workspace.
///
/// This covers period decoding failures, frequency validation, series lifecycle
/// misuse, request validation, and failures reported by data sources.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeriesError {
    /// A present period label could not be decoded for the stated frequency.
    #[error("malformed period label {label:?} for frequency {frequency}")]
    MalformedPeriodLabel {
        /// The offending label as received from the source.
        label: String,
        /// Wire code of the frequency the label was decoded against.
        frequency: String,
    },

    /// The frequency code is not recognized, or a concrete frequency was required.
    #[error("unsupported frequency: {code}")]
    UnsupportedFrequency {
        /// The code (or variant name) that was rejected.
        code: String,
    },

    /// Data was requested from a series that has not been populated yet.
    #[error("series not ready: {title}")]
    SeriesNotReady {
        /// Title of the series.
        title: String,
    },

    /// The native observations of a series were populated a second time.
    #[error("series already populated: {title}")]
    AlreadyPopulated {
        /// Title of the series.
        title: String,
    },

    /// Two records decoded to the same period index.
    #[error("duplicate period index {index}")]
    DuplicateIndex {
        /// The repeated index in the series' native frequency.
        index: i64,
    },

    /// A present observation value is not numeric.
    #[error("invalid observation value: {value:?}")]
    InvalidValue {
        /// The raw value as received from the source.
        value: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// The source has no series for the request.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "Q.KR.NGDP_SA_XDC".
        what: String,
    },

    /// A data source failed (transport, HTTP status, undecodable body).
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Name of the failing source.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A data source call exceeded the configured timeout.
    #[error("source timed out: {source_name}")]
    SourceTimeout {
        /// Name of the source that timed out.
        source_name: String,
    },

    /// Writing an export (CSV file, chart spec) failed.
    #[error("export failed: {0}")]
    Export(String),
}

impl SeriesError {
    /// Helper: build a `MalformedPeriodLabel` error.
    pub fn malformed_label(label: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self::MalformedPeriodLabel {
            label: label.into(),
            frequency: frequency.into(),
        }
    }

    /// Helper: build an `UnsupportedFrequency` error.
    pub fn unsupported_frequency(code: impl Into<String>) -> Self {
        Self::UnsupportedFrequency { code: code.into() }
    }

    /// Helper: build a `SeriesNotReady` error.
    pub fn not_ready(title: impl Into<String>) -> Self {
        Self::SeriesNotReady {
            title: title.into(),
        }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(source_name: impl Into<String>) -> Self {
        Self::SourceTimeout {
            source_name: source_name.into(),
        }
    }

    /// Returns true if the error comes from the data source rather than the core.
    ///
    /// Source errors abort a series before it exists; core errors indicate bad
    /// records or API misuse.
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::Source { .. } | Self::SourceTimeout { .. } | Self::NotFound { .. } | Self::Data(_)
        )
    }
}
