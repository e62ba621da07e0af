//! Record decoding and native-sequence invariants.

use crate::timeseries::period;
use crate::{Frequency, Observation, RawObservation, SeriesError};

/// Native observations decoded from source records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// Observations sorted ascending by index, indices unique.
    pub observations: Vec<Observation>,
    /// Records dropped because their period or value was absent.
    pub skipped: usize,
}

/// Decode raw source records into a canonical native sequence.
///
/// A record missing its period or value is skipped and counted. A record whose
/// fields are present but undecodable fails the whole batch: that indicates a
/// broken upstream contract rather than a sparse dataset.
///
/// # Errors
/// - `MalformedPeriodLabel` for a present label that does not decode.
/// - `InvalidValue` for a present value that is not numeric.
/// - `DuplicateIndex` if two records decode to the same period.
/// - `UnsupportedFrequency` if `frequency` is `Native`.
pub fn decode_records<I>(records: I, frequency: Frequency) -> Result<Decoded, SeriesError>
where
    I: IntoIterator<Item = RawObservation>,
{
    let frequency = frequency.concrete()?;
    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for rec in records {
        let (Some(period), Some(value)) = (rec.period, rec.value) else {
            skipped += 1;
            continue;
        };
        let index = period::decode(&period, frequency)?;
        observations.push(Observation::new(index, value.to_f64()?));
    }
    ensure_sorted_unique(&mut observations)?;
    Ok(Decoded {
        observations,
        skipped,
    })
}

/// Sort observations by index and reject repeated indices.
///
/// # Errors
/// Returns `DuplicateIndex` naming the first repeated index.
pub fn ensure_sorted_unique(obs: &mut [Observation]) -> Result<(), SeriesError> {
    obs.sort_by_key(|o| o.index);
    if let Some(w) = obs.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(SeriesError::DuplicateIndex { index: w[0].index });
    }
    Ok(())
}
