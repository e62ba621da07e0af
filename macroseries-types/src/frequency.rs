//! Frequency and aggregation policy enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SeriesError;

/// Reporting frequency of a series, or the frequency a view is requested in.
///
/// `Native` is a pass-through request: "whatever the series was reported in".
/// It is accepted wherever a view is requested but never as the native
/// frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Frequency {
    /// One period per calendar year (`A`).
    Annual,
    /// Four periods per calendar year (`Q`).
    Quarterly,
    /// Twelve periods per calendar year (`M`).
    Monthly,
    /// Pass through to the series' native frequency (`F`).
    Native,
}

impl Frequency {
    /// The three calendar frequencies, coarsest first.
    pub const CONCRETE: [Self; 3] = [Self::Annual, Self::Quarterly, Self::Monthly];

    /// Wire code used by the IMF API and in spreadsheet headers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Annual => "A",
            Self::Quarterly => "Q",
            Self::Monthly => "M",
            Self::Native => "F",
        }
    }

    /// Number of periods in one calendar year, `None` for `Native`.
    #[must_use]
    pub const fn periods_per_year(self) -> Option<i64> {
        match self {
            Self::Annual => Some(1),
            Self::Quarterly => Some(4),
            Self::Monthly => Some(12),
            Self::Native => None,
        }
    }

    /// Returns true for the `Native` pass-through variant.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }

    /// Replace `Native` with the given native frequency; other variants are returned as-is.
    #[must_use]
    pub const fn resolve(self, native: Self) -> Self {
        match self {
            Self::Native => native,
            other => other,
        }
    }

    /// Require a calendar frequency.
    ///
    /// # Errors
    /// Returns `UnsupportedFrequency` for `Native`.
    pub fn concrete(self) -> Result<Self, SeriesError> {
        if self.is_native() {
            return Err(SeriesError::unsupported_frequency(self.code()));
        }
        Ok(self)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Frequency {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "annual" => Ok(Self::Annual),
            "q" | "quarterly" => Ok(Self::Quarterly),
            "m" | "monthly" => Ok(Self::Monthly),
            "f" | "native" => Ok(Self::Native),
            _ => Err(SeriesError::unsupported_frequency(s)),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = SeriesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for &'static str {
    fn from(f: Frequency) -> Self {
        f.code()
    }
}

/// Rule for combining or distributing values across a conversion window.
///
/// Applies symmetrically: it governs both aggregation (finer to coarser) and
/// disaggregation (coarser to finer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AggregationPolicy {
    /// Rates and indices: average when aggregating, repeat when distributing.
    #[default]
    Average,
    /// Flows such as GDP: add when aggregating, split evenly when distributing.
    Sum,
}

impl AggregationPolicy {
    /// Lowercase name used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Sum => "sum",
        }
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationPolicy {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "avg" | "mean" => Ok(Self::Average),
            "sum" => Ok(Self::Sum),
            _ => Err(SeriesError::InvalidArg(format!(
                "unknown aggregation policy: {s}"
            ))),
        }
    }
}

impl TryFrom<String> for AggregationPolicy {
    type Error = SeriesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AggregationPolicy> for &'static str {
    fn from(p: AggregationPolicy) -> Self {
        p.as_str()
    }
}
