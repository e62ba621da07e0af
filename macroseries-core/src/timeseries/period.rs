//! Calendar period labels ↔ linear period indices.
//!
//! Each calendar frequency maps periods onto one integer timeline:
//!
//! | frequency | label       | index                 |
//! |-----------|-------------|-----------------------|
//! | annual    | `2010`      | `2010`                |
//! | quarterly | `2010-Q1`   | `2010 * 4 + (1 - 1)`  |
//! | monthly   | `2010-01`   | `2010 * 12 + (1 - 1)` |
//!
//! Because the index is linear, converting between frequencies is plain
//! integer arithmetic: quarter `q` covers months `3q..3q+3`, year `y` covers
//! quarters `4y..4y+4`.

use crate::{Frequency, SeriesError};

const QUARTER_MARKER: &str = "-Q";
const DATE_SEPARATOR: char = '-';

/// Decode a calendar label into a linear index for `frequency`.
///
/// Surrounding whitespace is ignored. Months may be zero padded (`2010-01`)
/// or not (`2010-1`). Years must fit an `i32`, the same range as the year
/// bounds of a request, so every decoded index can be re-sampled into any
/// calendar frequency without overflow.
///
/// # Errors
/// - `MalformedPeriodLabel` if the label does not match the frequency's
///   pattern (missing separator, non-numeric parts, year outside `i32`,
///   quarter outside `1..=4`, month outside `1..=12`).
/// - `UnsupportedFrequency` for `Frequency::Native`, which has no label format.
///
/// ```
/// use macroseries_core::{Frequency, timeseries::period::decode};
/// assert_eq!(decode("2010", Frequency::Annual).unwrap(), 2010);
/// assert_eq!(decode("2010-Q1", Frequency::Quarterly).unwrap(), 8040);
/// assert_eq!(decode("2010-01", Frequency::Monthly).unwrap(), 24120);
/// assert!(decode("2010Q1", Frequency::Quarterly).is_err());
/// ```
pub fn decode(label: &str, frequency: Frequency) -> Result<i64, SeriesError> {
    let malformed = || SeriesError::malformed_label(label, frequency.code());
    let trimmed = label.trim();
    match frequency {
        Frequency::Annual => parse_year(trimmed).ok_or_else(malformed),
        Frequency::Quarterly => {
            let (year, quarter) = trimmed.rsplit_once(QUARTER_MARKER).ok_or_else(malformed)?;
            let year = parse_year(year).ok_or_else(malformed)?;
            let quarter: u8 = quarter.parse().map_err(|_| malformed())?;
            if !(1..=4).contains(&quarter) {
                return Err(malformed());
            }
            Ok(year * 4 + i64::from(quarter) - 1)
        }
        Frequency::Monthly => {
            let (year, month) = trimmed.rsplit_once(DATE_SEPARATOR).ok_or_else(malformed)?;
            let year = parse_year(year).ok_or_else(malformed)?;
            let month: u8 = month.parse().map_err(|_| malformed())?;
            if !(1..=12).contains(&month) {
                return Err(malformed());
            }
            Ok(year * 12 + i64::from(month) - 1)
        }
        Frequency::Native => Err(SeriesError::unsupported_frequency(frequency.code())),
    }
}

fn parse_year(s: &str) -> Option<i64> {
    s.parse::<i32>().ok().map(i64::from)
}

/// Render a linear index as a calendar label for `frequency`.
///
/// Uses floor division so negative indices render (and decode back) correctly.
/// `Frequency::Native` carries no calendar, so the bare index is rendered.
///
/// ```
/// use macroseries_core::{Frequency, timeseries::period::encode};
/// assert_eq!(encode(2010, Frequency::Annual), "2010");
/// assert_eq!(encode(8043, Frequency::Quarterly), "2010-Q4");
/// assert_eq!(encode(24131, Frequency::Monthly), "2010-12");
/// ```
#[must_use]
pub fn encode(index: i64, frequency: Frequency) -> String {
    match frequency {
        Frequency::Annual | Frequency::Native => index.to_string(),
        Frequency::Quarterly => format!(
            "{}{QUARTER_MARKER}{}",
            index.div_euclid(4),
            index.rem_euclid(4) + 1
        ),
        Frequency::Monthly => format!(
            "{}{DATE_SEPARATOR}{}",
            index.div_euclid(12),
            index.rem_euclid(12) + 1
        ),
    }
}
