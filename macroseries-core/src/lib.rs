//! macroseries-core
//!
//! Core types, traits, and the frequency engine shared across the macroseries
//! crates.
//!
//! - `types`: re-exported data structures (frequencies, observations, requests).
//! - `connector`: the `DataSource` trait implemented by data providers.
//! - `timeseries`: the period codec and the resampler.
//! - `series`: a populated series with memoized frequency views.
//!
//! Everything except [`DataSource::observations`] and [`Series::fetch`] is
//! synchronous; the async seam exists so network-backed sources can plug in
//! without blocking a runtime.
#![warn(missing_docs)]

/// Data source trait implemented by providers.
pub mod connector;
/// Series container with cached views.
pub mod series;
/// Period codec and frequency conversion.
pub mod timeseries;
pub mod types;

pub use connector::{DataSource, SourceKey};
pub use series::Series;
pub use timeseries::period::{decode, encode};
pub use timeseries::resample::{ResamplePlan, convert_values, resample};
pub use types::*;
