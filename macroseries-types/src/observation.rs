//! Observations, raw source records, and derived views.

use serde::{Deserialize, Serialize};

use crate::SeriesError;

/// One `(index, value)` point in a series' native frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Linear period index (see the period codec).
    pub index: i64,
    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Construct an observation.
    #[must_use]
    pub const fn new(index: i64, value: f64) -> Self {
        Self { index, value }
    }
}

/// Column-oriented `{time, value}` view handed to presentation sinks.
///
/// Both columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedView {
    time: Vec<i64>,
    value: Vec<f64>,
}

impl DerivedView {
    /// Build a view from `(index, value)` pairs, preserving their order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let (time, value) = pairs.into_iter().unzip();
        Self { time, value }
    }

    /// Build a view from native observations.
    #[must_use]
    pub fn from_observations(obs: &[Observation]) -> Self {
        Self::from_pairs(obs.iter().map(|o| (o.index, o.value)))
    }

    /// Period indices.
    #[must_use]
    pub fn time(&self) -> &[i64] {
        &self.time
    }

    /// Values aligned with [`Self::time`].
    #[must_use]
    pub fn value(&self) -> &[f64] {
        &self.value
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns true if the view holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterate `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.time.iter().copied().zip(self.value.iter().copied())
    }

    /// Value at a period index, if present.
    #[must_use]
    pub fn get(&self, index: i64) -> Option<f64> {
        self.time
            .iter()
            .position(|&t| t == index)
            .map(|pos| self.value[pos])
    }
}

/// An observed value as delivered by a source: JSON sources mix strings and numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Numeric JSON value.
    Number(f64),
    /// Textual value, parsed on demand.
    Text(String),
}

impl RawValue {
    /// Interpret the raw value as a float.
    ///
    /// # Errors
    /// Returns `InvalidValue` if a textual value does not parse as a number.
    pub fn to_f64(&self) -> Result<f64, SeriesError> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| SeriesError::InvalidValue {
                value: s.clone(),
            }),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A record as supplied by a data source, before decoding.
///
/// Either field may be absent; such records are skipped during population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Calendar period label, e.g. `2010`, `2010-Q1`, `2010-01`.
    pub period: Option<String>,
    /// Observed value.
    pub value: Option<RawValue>,
}

impl RawObservation {
    /// Construct a complete record.
    pub fn new(period: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self {
            period: Some(period.into()),
            value: Some(value.into()),
        }
    }

    /// Returns true if both the period and the value are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.period.is_some() && self.value.is_some()
    }
}
