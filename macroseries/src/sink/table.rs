use macroseries_core::SeriesError;

use crate::core::LoadedCollection;

/// Prefix of the first cell of every header row.
pub const TIME_PREFIX: &str = "time:";

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A label or title.
    Text(String),
    /// An observation value.
    Number(f64),
}

impl Cell {
    /// Cell content as written to text exports.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(v) => v.to_string(),
        }
    }
}

/// Rows of a spreadsheet, each possibly of a different width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// All rows; separator rows are empty.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Lay out every series as three rows:
///
/// ```text
/// time:Q | 1995-Q1 | 1995-Q2 | ...
/// GDP    | 101.2   | 102.9   | ...
/// (blank)
/// ```
///
/// Each series is rendered in the collection's display frequency, or its own
/// when that is `Native`.
///
/// # Errors
/// Returns `SeriesNotReady` if a series was never populated.
pub fn build(collection: &LoadedCollection) -> Result<Table, SeriesError> {
    let mut rows = Vec::with_capacity(collection.series().len() * 3);
    for series in collection.series() {
        let freq = collection.display_frequency(series);
        let view = series.view(freq)?;

        let mut header = Vec::with_capacity(view.len() + 1);
        header.push(Cell::Text(format!("{TIME_PREFIX}{}", freq.code())));
        header.extend(view.time().iter().map(|&t| Cell::Text(series.label(t, freq))));

        let mut values = Vec::with_capacity(view.len() + 1);
        values.push(Cell::Text(series.title().to_string()));
        values.extend(view.value().iter().map(|&v| Cell::Number(v)));

        rows.push(header);
        rows.push(values);
        rows.push(Vec::new());
    }
    Ok(Table { rows })
}
