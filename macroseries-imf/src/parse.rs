//! Extraction of observations from `CompactData` payloads.
//!
//! The service nests observations under `CompactData.DataSet.Series.Obs`.
//! `Obs` is an array in general but collapses to a single object when the
//! series has exactly one observation.

use macroseries_core::{RawObservation, RawValue, SeriesError};
use serde::Deserialize;
use serde_json::Value;

use crate::SOURCE_NAME;

const EXCERPT_LEN: usize = 120;

#[derive(Deserialize)]
struct ObsRecord {
    #[serde(rename = "@TIME_PERIOD")]
    period: Option<String>,
    #[serde(rename = "@OBS_VALUE")]
    value: Option<RawValue>,
}

impl From<ObsRecord> for RawObservation {
    fn from(r: ObsRecord) -> Self {
        Self {
            period: r.period,
            value: r.value,
        }
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

fn is_absent(v: Option<&Value>) -> bool {
    v.is_none_or(Value::is_null)
}

/// Parse a `CompactData` response body into raw records.
///
/// `what` names the requested series in error messages.
///
/// # Errors
/// - `Source` if the body is not JSON (the message carries a body excerpt).
/// - `Data` if the `CompactData.DataSet` path is missing or a node has the wrong shape.
/// - `NotFound` if the dataset holds no series or the series holds no observations.
pub fn parse_compact_data(body: &str, what: &str) -> Result<Vec<RawObservation>, SeriesError> {
    let root: Value = serde_json::from_str(body).map_err(|e| {
        SeriesError::source(
            SOURCE_NAME,
            format!("invalid JSON for {what}: {e}; body starts with {:?}", excerpt(body)),
        )
    })?;
    let dataset = root
        .get("CompactData")
        .and_then(|c| c.get("DataSet"))
        .ok_or_else(|| {
            SeriesError::Data(format!(
                "missing CompactData.DataSet for {what}; frequency may be unavailable"
            ))
        })?;

    let series = dataset.get("Series");
    if is_absent(series) {
        return Err(SeriesError::not_found(what));
    }
    let series = match series {
        Some(Value::Object(_)) => series,
        Some(Value::Array(items)) if items.len() == 1 => items.first(),
        Some(Value::Array(items)) => {
            return Err(SeriesError::Data(format!(
                "expected one series for {what}, got {}",
                items.len()
            )));
        }
        _ => return Err(SeriesError::Data(format!("unexpected Series node for {what}"))),
    };

    let obs = series.and_then(|s| s.get("Obs"));
    if is_absent(obs) {
        return Err(SeriesError::not_found(what));
    }
    match obs {
        Some(Value::Array(items)) => items.iter().map(|v| record(v, what)).collect(),
        Some(v @ Value::Object(_)) => Ok(vec![record(v, what)?]),
        _ => Err(SeriesError::Data(format!("unexpected Obs node for {what}"))),
    }
}

fn record(v: &Value, what: &str) -> Result<RawObservation, SeriesError> {
    ObsRecord::deserialize(v)
        .map(RawObservation::from)
        .map_err(|e| SeriesError::Data(format!("bad observation for {what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_array_of_observations() {
        let body = r#"{"CompactData":{"DataSet":{"Series":{"@FREQ":"Q","Obs":[
            {"@TIME_PERIOD":"2010-Q1","@OBS_VALUE":"1.5"},
            {"@TIME_PERIOD":"2010-Q2"}
        ]}}}}"#;
        let recs = parse_compact_data(body, "Q.KR.X").unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], RawObservation::new("2010-Q1", "1.5"));
        assert!(!recs[1].is_complete());
    }

    #[test]
    fn single_object_obs_is_one_record() {
        let body = r#"{"CompactData":{"DataSet":{"Series":{"Obs":
            {"@TIME_PERIOD":"2010","@OBS_VALUE":42}
        }}}}"#;
        let recs = parse_compact_data(body, "A.KR.X").unwrap();
        assert_eq!(recs, vec![RawObservation::new("2010", 42.0)]);
    }

    #[test]
    fn missing_dataset_is_a_data_error() {
        let err = parse_compact_data(r#"{"CompactData":{}}"#, "M.KR.X").unwrap_err();
        assert!(matches!(err, SeriesError::Data(ref m) if m.contains("frequency may be unavailable")));
    }

    #[test]
    fn null_series_is_not_found() {
        let err =
            parse_compact_data(r#"{"CompactData":{"DataSet":{"Series":null}}}"#, "A.KR.X")
                .unwrap_err();
        assert_eq!(err, SeriesError::not_found("A.KR.X"));
        let err = parse_compact_data(r#"{"CompactData":{"DataSet":{"Series":{}}}}"#, "A.KR.X")
            .unwrap_err();
        assert_eq!(err, SeriesError::not_found("A.KR.X"));
    }

    #[test]
    fn html_body_is_a_source_error_with_excerpt() {
        let err = parse_compact_data("<html>Service Unavailable</html>", "A.KR.X").unwrap_err();
        match err {
            SeriesError::Source { source_name, msg } => {
                assert_eq!(source_name, SOURCE_NAME);
                assert!(msg.contains("<html>Service"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let long = "é".repeat(EXCERPT_LEN * 2);
        assert_eq!(excerpt(&long).chars().count(), EXCERPT_LEN);
        assert_eq!(excerpt("short"), "short");
    }
}
