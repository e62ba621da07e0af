//! Shared macroseries data transfer objects, errors, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod frequency;
mod observation;
mod request;

pub use config::{CollectionConfig, DEFAULT_BASE_URL, SeriesConfig, SourceConfig};
pub use error::SeriesError;
pub use frequency::{AggregationPolicy, Frequency};
pub use observation::{DerivedView, Observation, RawObservation, RawValue};
pub use request::{DEFAULT_DATABASE, SeriesRequest, SeriesSpec};
