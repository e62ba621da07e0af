use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use macroseries_core::{
    AggregationPolicy, DataSource, Frequency, RawObservation, Series, SeriesError, SeriesRequest,
    SeriesSpec, encode,
};

struct CountingSource {
    records: Vec<RawObservation>,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(records: Vec<RawObservation>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DataSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn supported_frequencies(&self) -> &'static [Frequency] {
        &Frequency::CONCRETE
    }

    async fn observations(
        &self,
        _req: &SeriesRequest,
    ) -> Result<Vec<RawObservation>, SeriesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

struct AnnualOnly;

#[async_trait]
impl DataSource for AnnualOnly {
    fn name(&self) -> &'static str {
        "annual-only"
    }

    fn supported_frequencies(&self) -> &'static [Frequency] {
        &[Frequency::Annual]
    }

    async fn observations(
        &self,
        _req: &SeriesRequest,
    ) -> Result<Vec<RawObservation>, SeriesError> {
        Ok(vec![])
    }
}

fn spec(f: Frequency, policy: AggregationPolicy, start: i32, end: i32) -> SeriesSpec {
    let req = SeriesRequest::new(f, "KR", "NGDP_SA_XDC", start, end).unwrap();
    SeriesSpec::new("GDP", req).with_policy(policy)
}

#[test]
fn monthly_to_quarterly_skips_empty_windows() {
    // Year 0, every month except March; quarter 0 averages Jan and Feb.
    let s = Series::new(spec(Frequency::Monthly, AggregationPolicy::Average, 0, 0));
    let records: Vec<RawObservation> = (0..12i64)
        .filter(|m| *m != 2)
        .map(|m| RawObservation::new(encode(m, Frequency::Monthly), (m + 1) as f64))
        .collect();
    s.populate(records).unwrap();

    let q = s.view(Frequency::Quarterly).unwrap();
    assert_eq!(q.time(), &[0, 1, 2, 3]);
    assert_eq!(q.value(), &[1.5, 5.0, 8.0, 11.0]);
}

#[test]
fn quarter_without_any_month_is_omitted() {
    let s = Series::new(spec(Frequency::Monthly, AggregationPolicy::Sum, 2020, 2020));
    s.populate(vec![
        RawObservation::new("2020-01", 1.0),
        RawObservation::new("2020-11", 2.0),
    ])
    .unwrap();
    let q = s.view(Frequency::Quarterly).unwrap();
    assert_eq!(q.time(), &[2020 * 4, 2020 * 4 + 3]);
    assert_eq!(q.value(), &[1.0, 2.0]);
}

#[test]
fn annual_to_monthly_with_each_policy() {
    for (policy, expected) in [
        (AggregationPolicy::Average, 120.0),
        (AggregationPolicy::Sum, 10.0),
    ] {
        let s = Series::new(spec(Frequency::Annual, policy, 5, 5));
        s.populate(vec![RawObservation::new("5", 120.0)]).unwrap();
        let m = s.view(Frequency::Monthly).unwrap();
        assert_eq!(m.time(), (60..72).collect::<Vec<i64>>().as_slice());
        assert!(m.value().iter().all(|v| *v == expected), "{policy}");
    }
}

#[test]
fn quarterly_to_annual_sum() {
    let s = Series::new(spec(Frequency::Quarterly, AggregationPolicy::Sum, 10, 10));
    s.populate(vec![RawObservation::new("10-Q1", 90.0)]).unwrap();
    let a = s.view(Frequency::Annual).unwrap();
    assert_eq!(a.time(), &[10]);
    assert_eq!(a.value(), &[90.0]);
}

#[test]
fn identity_and_native_views_are_the_native_data() {
    let s = Series::new(spec(Frequency::Quarterly, AggregationPolicy::Average, 2010, 2010));
    s.populate(vec![
        RawObservation::new("2010-Q2", "2.5"),
        RawObservation::new("2010-Q1", "1.5"),
    ])
    .unwrap();
    let native = s.data().unwrap();
    assert_eq!(native.time(), &[8040, 8041]);
    assert!(std::ptr::eq(native, s.view(Frequency::Quarterly).unwrap()));
    assert!(std::ptr::eq(native, s.view(Frequency::Native).unwrap()));
    assert_eq!(
        s.labels(Frequency::Native).unwrap(),
        vec!["2010-Q1".to_string(), "2010-Q2".to_string()]
    );
}

#[test]
fn incomplete_records_are_skipped_and_counted() {
    let s = Series::new(spec(Frequency::Annual, AggregationPolicy::Average, 2000, 2002));
    s.populate(vec![
        RawObservation::new("2000", 1.0),
        RawObservation {
            period: Some("2001".into()),
            value: None,
        },
        RawObservation::new("2002", 3.0),
    ])
    .unwrap();
    assert_eq!(s.skipped_records().unwrap(), 1);
    assert_eq!(s.data().unwrap().time(), &[2000, 2002]);
}

#[test]
fn malformed_label_leaves_series_unpopulated() {
    let s = Series::new(spec(Frequency::Quarterly, AggregationPolicy::Average, 2000, 2000));
    let err = s
        .populate(vec![RawObservation::new("2000Q1", 1.0)])
        .unwrap_err();
    assert!(matches!(err, SeriesError::MalformedPeriodLabel { .. }));
    assert!(!s.is_ready());
    assert!(matches!(
        s.view(Frequency::Annual),
        Err(SeriesError::SeriesNotReady { .. })
    ));
}

#[tokio::test]
async fn fetch_queries_source_once_and_memoizes_views() {
    let source = CountingSource::new(vec![
        RawObservation::new("2001", 4.0),
        RawObservation::new("2000", 8.0),
    ]);
    let s = Series::fetch(
        spec(Frequency::Annual, AggregationPolicy::Sum, 2000, 2001),
        &source,
    )
    .await
    .unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    let q1 = s.view(Frequency::Quarterly).unwrap();
    let q2 = s.view(Frequency::Quarterly).unwrap();
    assert!(std::ptr::eq(q1, q2));
    assert_eq!(q1.get(8000), Some(2.0));
    assert_eq!(q1.get(8004), Some(1.0));

    let m = s.view(Frequency::Monthly).unwrap();
    assert_eq!(m.len(), 24);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(s.label(m.time()[0], Frequency::Monthly), "2000-1");
}

#[tokio::test]
async fn fetch_rejects_unsupported_native_frequency() {
    let err = Series::fetch(
        spec(Frequency::Monthly, AggregationPolicy::Average, 2000, 2000),
        &AnnualOnly,
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        SeriesError::UnsupportedFrequency {
            code: "M".into()
        }
    );
}
