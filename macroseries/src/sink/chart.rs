use macroseries_core::{DerivedView, Frequency, SeriesError, encode};
use serde::Serialize;

use crate::core::LoadedCollection;

/// One labeled position on the x axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// Period index in the axis frequency.
    pub index: i64,
    /// Calendar label of `index`.
    pub label: String,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Series title.
    pub title: String,
    /// Frequency the data is expressed in.
    pub frequency: Frequency,
    /// `{time, value}` columns.
    pub data: DerivedView,
}

/// Everything an external renderer needs to draw a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Collection title.
    pub title: String,
    /// Frequency of the x axis.
    pub axis_frequency: Frequency,
    /// Axis ticks, ascending.
    pub ticks: Vec<Tick>,
    /// One panel per series, in collection order.
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `Export` if serialization fails.
    pub fn to_json(&self) -> Result<String, SeriesError> {
        serde_json::to_string_pretty(self).map_err(|e| SeriesError::Export(e.to_string()))
    }
}

/// Tick positions from the first period of `start_year` through the first
/// period of `end_year`, every `interval` periods of `frequency`.
///
/// Annual axes step through years `start_year..=end_year`.
#[must_use]
pub fn ticks(frequency: Frequency, start_year: i32, end_year: i32, interval: usize) -> Vec<Tick> {
    let ppy = frequency.periods_per_year().unwrap_or(1);
    let first = i64::from(start_year) * ppy;
    let last = i64::from(end_year) * ppy;
    (first..=last)
        .step_by(interval.max(1))
        .map(|index| Tick {
            index,
            label: encode(index, frequency),
        })
        .collect()
}

/// Build the chart description of `collection`.
///
/// # Errors
/// Returns `SeriesNotReady` if a series was never populated.
pub fn build(collection: &LoadedCollection) -> Result<ChartSpec, SeriesError> {
    let axis = collection.axis_frequency();
    let panels = collection
        .series()
        .iter()
        .map(|s| {
            let frequency = collection.display_frequency(s);
            Ok(Panel {
                title: s.title().to_string(),
                frequency,
                data: s.view(frequency)?.clone(),
            })
        })
        .collect::<Result<Vec<_>, SeriesError>>()?;
    Ok(ChartSpec {
        title: collection.title().to_string(),
        axis_frequency: axis,
        ticks: ticks(
            axis,
            collection.start_year(),
            collection.end_year(),
            collection.interval(),
        ),
        panels,
    })
}
