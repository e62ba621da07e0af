//! macroseries loads macroeconomic time series and renders them in a common frequency.
//!
//! Overview
//! - A [`Collection`] groups series that share a year range, a display
//!   frequency and one [`DataSource`].
//! - [`Collection::load`] fetches every series concurrently, each call bounded
//!   by a timeout. Loading is all or nothing.
//! - A [`LoadedCollection`] feeds the sinks: a spreadsheet table, a CSV export
//!   and a chart description.
//! - Frequency conversion happens lazily per series and is cached; rendering
//!   the same collection twice does not recompute views.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use macroseries::{AggregationPolicy, Collection, Frequency, SeriesConfig};
//! use macroseries_imf::ImfConnector;
//!
//! let imf = Arc::new(ImfConnector::new_default()?);
//! let collection = Collection::builder()
//!     .title("Korea Data")
//!     .years(1995, 2022)
//!     .frequency(Frequency::Monthly)
//!     .interval(6)
//!     .source(imf)
//!     .series(SeriesConfig {
//!         title: "Korea GDP".into(),
//!         frequency: Frequency::Quarterly,
//!         country: "KR".into(),
//!         indicator: "NGDP_SA_XDC".into(),
//!         aggregation: AggregationPolicy::Sum,
//!         database: None,
//!     })
//!     .build()?;
//! let loaded = collection.load().await?;
//! loaded.export_csv(std::path::Path::new("."))?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
pub mod sink;

pub use crate::core::{Collection, CollectionBuilder, DEFAULT_TIMEOUT, LoadedCollection};
pub use sink::chart::{ChartSpec, Panel, Tick};
pub use sink::table::{Cell, Table};

// Re-export core types for convenience
pub use macroseries_core::{
    AggregationPolicy, CollectionConfig, DEFAULT_DATABASE, DataSource, DerivedView, Frequency,
    Observation, RawObservation, RawValue, Series, SeriesConfig, SeriesError, SeriesRequest,
    SeriesSpec, SourceConfig, SourceKey,
};
