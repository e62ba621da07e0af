//! Presentation sinks for a loaded collection.
//!
//! - `table`: spreadsheet-style rows (header, values, blank separator per series).
//! - `csv`: the table written as CSV.
//! - `chart`: a serializable chart description for an external renderer.

/// Chart spec with axis ticks and one panel per series.
pub mod chart;
/// CSV export of the table.
pub mod csv;
/// Spreadsheet table layout.
pub mod table;
