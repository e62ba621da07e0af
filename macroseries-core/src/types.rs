//! Re-export of foundational types from `macroseries-types`.
// Consolidated re-exports so downstream crates can depend on `macroseries-core` only

pub use macroseries_types::{AggregationPolicy, Frequency, SeriesError};
pub use macroseries_types::{CollectionConfig, DEFAULT_BASE_URL, SeriesConfig, SourceConfig};
pub use macroseries_types::{DEFAULT_DATABASE, SeriesRequest, SeriesSpec};
pub use macroseries_types::{DerivedView, Observation, RawObservation, RawValue};
