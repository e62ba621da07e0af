use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use macroseries_core::SeriesError;

use super::table::{self, Table};
use crate::core::LoadedCollection;

/// Timestamp suffix of export file names, e.g. `230415_0930`.
pub const FILE_STAMP_FORMAT: &str = "%y%m%d_%H%M";

fn export_err(e: impl std::fmt::Display) -> SeriesError {
    SeriesError::Export(e.to_string())
}

/// Default export file name: `{title}_{yymmdd_HHMM}.csv`.
#[must_use]
pub fn default_file_name(title: &str, at: &DateTime<Local>) -> String {
    format!("{title}_{}.csv", at.format(FILE_STAMP_FORMAT))
}

/// Write `table` as CSV. Rows keep their own widths; blank separator rows
/// are written as a single empty field.
///
/// # Errors
/// Returns `Export` if writing fails.
pub fn write_table<W: io::Write>(table: &Table, out: W) -> Result<(), SeriesError> {
    let mut w = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for row in table.rows() {
        if row.is_empty() {
            w.write_record([""]).map_err(export_err)?;
        } else {
            w.write_record(row.iter().map(table::Cell::render))
                .map_err(export_err)?;
        }
    }
    w.flush().map_err(export_err)
}

/// Lay out `collection` and write it as CSV to `out`.
///
/// # Errors
/// `SeriesNotReady` for an unpopulated series, `Export` if writing fails.
pub fn write_collection<W: io::Write>(
    collection: &LoadedCollection,
    out: W,
) -> Result<(), SeriesError> {
    write_table(&table::build(collection)?, out)
}

/// Write `collection` to `path`, or to `dir/{default_file_name}` when `path` is a directory.
///
/// Returns the path written.
///
/// # Errors
/// `SeriesNotReady` for an unpopulated series, `Export` if the file cannot be written.
pub fn export(collection: &LoadedCollection, path: &Path) -> Result<PathBuf, SeriesError> {
    let target = if path.is_dir() {
        path.join(default_file_name(collection.title(), &Local::now()))
    } else {
        path.to_path_buf()
    };
    let file = File::create(&target)
        .map_err(|e| SeriesError::Export(format!("{}: {e}", target.display())))?;
    write_collection(collection, io::BufWriter::new(file))?;
    #[cfg(feature = "tracing")]
    tracing::info!(path = %target.display(), "exported collection");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_uses_title_and_minute_stamp() {
        let at = Local.with_ymd_and_hms(2023, 4, 15, 9, 30, 59).unwrap();
        assert_eq!(default_file_name("Korea Data", &at), "Korea Data_230415_0930.csv");
    }
}
