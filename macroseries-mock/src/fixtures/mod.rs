//! Deterministic synthetic series keyed by indicator code.
//!
//! Values are a pure function of `(indicator, country, period index)`, so
//! every run (and every frequency) of the mock sees the same numbers.

use macroseries_core::{Frequency, RawObservation, RawValue, SeriesRequest};

/// Indicators the mock knows how to generate.
pub const INDICATORS: &[&str] = &[
    "NGDP_SA_XDC",
    "PCPI_IX",
    "ENDA_XDC_USD_RATE",
    "LUR_PT",
    "MISSING",
];

struct Shape {
    base: f64,
    yearly_growth: f64,
    seasonal: f64,
}

fn shape(indicator: &str) -> Option<Shape> {
    let s = match indicator {
        "NGDP_SA_XDC" => Shape {
            base: 100_000.0,
            yearly_growth: 0.03,
            seasonal: 0.0,
        },
        "PCPI_IX" | "MISSING" => Shape {
            base: 80.0,
            yearly_growth: 0.02,
            seasonal: 0.004,
        },
        "ENDA_XDC_USD_RATE" => Shape {
            base: 1_100.0,
            yearly_growth: 0.005,
            seasonal: 0.01,
        },
        "LUR_PT" => Shape {
            base: 3.5,
            yearly_growth: 0.0,
            seasonal: 0.05,
        },
        _ => return None,
    };
    Some(s)
}

fn country_scale(country: &str) -> f64 {
    let sum: u32 = country.bytes().map(u32::from).sum();
    1.0 + f64::from(sum % 17) / 10.0
}

fn label(year: i32, period: i64, frequency: Frequency) -> String {
    match frequency {
        Frequency::Quarterly => format!("{year}-Q{}", period + 1),
        Frequency::Monthly => format!("{year}-{:02}", period + 1),
        Frequency::Annual | Frequency::Native => year.to_string(),
    }
}

/// Records for `req`, or `None` for an unknown indicator.
///
/// The `MISSING` indicator blanks the value of every fifth period, the way
/// sparse upstream series do.
#[allow(clippy::cast_precision_loss)]
pub fn by_request(req: &SeriesRequest) -> Option<Vec<RawObservation>> {
    let shape = shape(req.indicator())?;
    let ppy = req.frequency().periods_per_year()?;
    let scale = country_scale(req.country());
    let sparse = req.indicator() == "MISSING";
    let mut out = Vec::new();
    for year in req.start_year()..=req.end_year() {
        for p in 0..ppy {
            let t = (f64::from(year - 2000) * ppy as f64 + p as f64) / ppy as f64;
            let season = shape.seasonal * ((p as f64) * std::f64::consts::TAU / ppy as f64).sin();
            let v = shape.base * scale * (1.0 + shape.yearly_growth).powf(t) * (1.0 + season);
            let v = (v * 100.0).round() / 100.0;
            let index = i64::from(year) * ppy + p;
            let value = if sparse && index % 5 == 0 {
                None
            } else {
                Some(RawValue::Text(v.to_string()))
            };
            out.push(RawObservation {
                period: Some(label(year, p, req.frequency())),
                value,
            });
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_indicator_has_no_fixture() {
        let req = SeriesRequest::new(Frequency::Annual, "KR", "NOPE", 2000, 2001).unwrap();
        assert!(by_request(&req).is_none());
    }

    #[test]
    fn one_record_per_period() {
        let req = SeriesRequest::new(Frequency::Monthly, "KR", "PCPI_IX", 2000, 2001).unwrap();
        let recs = by_request(&req).unwrap();
        assert_eq!(recs.len(), 24);
        assert_eq!(recs[0].period.as_deref(), Some("2000-01"));
        assert_eq!(recs[23].period.as_deref(), Some("2001-12"));
        assert!(recs.iter().all(RawObservation::is_complete));
    }

    #[test]
    fn sparse_indicator_blanks_some_values() {
        let req = SeriesRequest::new(Frequency::Quarterly, "KR", "MISSING", 2000, 2004).unwrap();
        let recs = by_request(&req).unwrap();
        let blank = recs.iter().filter(|r| r.value.is_none()).count();
        assert_eq!(blank, 4);
    }
}
