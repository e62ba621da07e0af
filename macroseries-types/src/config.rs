//! Configuration types shared by connectors, the orchestrator, and the CLI.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::DEFAULT_DATABASE;
use crate::{AggregationPolicy, Frequency, SeriesError, SeriesRequest, SeriesSpec};

/// Root of the IMF SDMX-JSON `CompactData` service.
pub const DEFAULT_BASE_URL: &str = "http://dataservices.imf.org/REST/SDMX_JSON.svc/CompactData";

/// Connection settings for the remote statistical API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Service root; the database and series key are appended as path segments.
    pub base_url: String,
    /// Database identifier used when a series does not name one.
    pub database: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Optional `User-Agent` header.
    pub user_agent: Option<String>,
}

impl SourceConfig {
    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// One `[[series]]` entry of a collection file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    /// Display title.
    pub title: String,
    /// Native frequency to query.
    pub frequency: Frequency,
    /// Country/region code.
    pub country: String,
    /// Indicator code.
    pub indicator: String,
    /// Aggregation policy used when re-sampling.
    #[serde(default)]
    pub aggregation: AggregationPolicy,
    /// Database override; falls back to `[source].database`.
    #[serde(default)]
    pub database: Option<String>,
}

impl SeriesConfig {
    /// Validated spec over `start_year..=end_year`, querying `default_database`
    /// unless this entry names its own.
    ///
    /// # Errors
    /// Returns the request validation failure.
    pub fn to_spec(
        &self,
        start_year: i32,
        end_year: i32,
        default_database: &str,
    ) -> Result<SeriesSpec, SeriesError> {
        let req = SeriesRequest::new(
            self.frequency,
            self.country.clone(),
            self.indicator.clone(),
            start_year,
            end_year,
        )?
        .with_database(self.database.as_deref().unwrap_or(default_database))?;
        Ok(SeriesSpec::new(self.title.clone(), req).with_policy(self.aggregation))
    }
}

/// A titled collection of series sharing one year range and display frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Collection title; also the stem of exported file names.
    pub title: String,
    /// First calendar year, inclusive.
    pub start_year: i32,
    /// Last calendar year, inclusive.
    pub end_year: i32,
    /// Frequency every series is rendered in; `F` keeps each series native.
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,
    /// Chart tick step, in periods of the display frequency.
    #[serde(default = "default_interval")]
    pub interval: usize,
    /// Source connection settings.
    #[serde(default)]
    pub source: SourceConfig,
    /// Series to load.
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

const fn default_frequency() -> Frequency {
    Frequency::Native
}

const fn default_interval() -> usize {
    1
}

impl CollectionConfig {
    /// Turn every `[[series]]` entry into a validated spec over the collection's years.
    ///
    /// # Errors
    /// Returns the first request validation failure.
    pub fn specs(&self) -> Result<Vec<SeriesSpec>, SeriesError> {
        self.series
            .iter()
            .map(|s| s.to_spec(self.start_year, self.end_year, &self.source.database))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_defaults_point_at_imf() {
        let cfg = SourceConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.database, "IFS");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn specs_inherit_collection_years_and_database() {
        let cfg = CollectionConfig {
            title: "Korea".into(),
            start_year: 1995,
            end_year: 2022,
            frequency: Frequency::Monthly,
            interval: 6,
            source: SourceConfig {
                database: "BOP".into(),
                ..SourceConfig::default()
            },
            series: vec![SeriesConfig {
                title: "GDP".into(),
                frequency: Frequency::Quarterly,
                country: "KR".into(),
                indicator: "NGDP_SA_XDC".into(),
                aggregation: AggregationPolicy::Sum,
                database: None,
            }],
        };
        let specs = cfg.specs().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].request.database(), "BOP");
        assert_eq!(specs[0].request.start_year(), 1995);
        assert_eq!(specs[0].policy, AggregationPolicy::Sum);
    }
}
