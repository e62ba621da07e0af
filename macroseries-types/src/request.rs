//! Validated source requests and series specifications.

use serde::Serialize;

use crate::{AggregationPolicy, Frequency, SeriesError};

/// Database queried when none is given: International Financial Statistics.
pub const DEFAULT_DATABASE: &str = "IFS";

/// What to ask a data source for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SeriesRequest {
    database: String,
    frequency: Frequency,
    country: String,
    indicator: String,
    start_year: i32,
    end_year: i32,
}

impl SeriesRequest {
    /// Build a request against the default database.
    ///
    /// # Errors
    /// - `UnsupportedFrequency` if `frequency` is `Native`.
    /// - `InvalidArg` if the country or indicator is blank, or `start_year > end_year`.
    pub fn new(
        frequency: Frequency,
        country: impl Into<String>,
        indicator: impl Into<String>,
        start_year: i32,
        end_year: i32,
    ) -> Result<Self, SeriesError> {
        let frequency = frequency.concrete()?;
        let country = country.into().trim().to_string();
        let indicator = indicator.into().trim().to_string();
        if country.is_empty() {
            return Err(SeriesError::InvalidArg("country code must not be empty".into()));
        }
        if indicator.is_empty() {
            return Err(SeriesError::InvalidArg(
                "indicator code must not be empty".into(),
            ));
        }
        if start_year > end_year {
            return Err(SeriesError::InvalidArg(format!(
                "start year {start_year} is after end year {end_year}"
            )));
        }
        Ok(Self {
            database: DEFAULT_DATABASE.to_string(),
            frequency,
            country,
            indicator,
            start_year,
            end_year,
        })
    }

    /// Query a different database (e.g. `BOP`).
    ///
    /// # Errors
    /// Returns `InvalidArg` if the database identifier is blank.
    pub fn with_database(mut self, database: impl Into<String>) -> Result<Self, SeriesError> {
        let database = database.into().trim().to_string();
        if database.is_empty() {
            return Err(SeriesError::InvalidArg("database must not be empty".into()));
        }
        self.database = database;
        Ok(self)
    }

    /// Database identifier.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Native frequency requested (never `Native`).
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Country/region code (`REF_AREA`).
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Indicator code (`INDICATOR`).
    #[must_use]
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// First calendar year, inclusive.
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last calendar year, inclusive.
    #[must_use]
    pub const fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Dotted series key, e.g. `Q.KR.NGDP_SA_XDC`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}.{}", self.frequency.code(), self.country, self.indicator)
    }
}

/// A titled request plus the aggregation policy used when re-sampling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSpec {
    /// Display title.
    pub title: String,
    /// Source request.
    pub request: SeriesRequest,
    /// Aggregation policy, fixed for the lifetime of the series.
    pub policy: AggregationPolicy,
}

impl SeriesSpec {
    /// Build a spec with the default (`Average`) policy.
    pub fn new(title: impl Into<String>, request: SeriesRequest) -> Self {
        Self {
            title: title.into(),
            request,
            policy: AggregationPolicy::default(),
        }
    }

    /// Override the aggregation policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_native_frequency() {
        let err = SeriesRequest::new(Frequency::Native, "KR", "X", 2000, 2001).unwrap_err();
        assert!(matches!(err, SeriesError::UnsupportedFrequency { .. }));
    }

    #[test]
    fn rejects_inverted_years() {
        let err = SeriesRequest::new(Frequency::Annual, "KR", "X", 2002, 2001).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidArg(_)));
    }

    #[test]
    fn key_joins_codes() {
        let req = SeriesRequest::new(Frequency::Quarterly, " KR ", "NGDP_SA_XDC", 1995, 2022)
            .unwrap();
        assert_eq!(req.key(), "Q.KR.NGDP_SA_XDC");
        assert_eq!(req.database(), "IFS");
    }
}
