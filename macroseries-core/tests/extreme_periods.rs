use macroseries_core::{
    AggregationPolicy, Frequency, Observation, RawObservation, Series, SeriesError, SeriesRequest,
    SeriesSpec, resample,
};

fn series(f: Frequency, start: i32, end: i32) -> Series {
    let req = SeriesRequest::new(f, "KR", "TEST", start, end).unwrap();
    Series::new(SeriesSpec::new("extreme", req).with_policy(AggregationPolicy::Sum))
}

#[test]
fn year_beyond_i32_is_rejected_at_population() {
    let s = series(Frequency::Annual, 2000, 2001);
    let err = s
        .populate(vec![RawObservation::new("800000000000000000", 1.0)])
        .unwrap_err();
    assert!(matches!(err, SeriesError::MalformedPeriodLabel { .. }));
    assert!(!s.is_ready());
}

#[test]
fn largest_years_upsample_to_monthly() {
    let s = series(Frequency::Annual, i32::MAX - 1, i32::MAX);
    s.populate(vec![
        RawObservation::new(i32::MAX.to_string(), 12.0),
        RawObservation::new(i32::MIN.to_string(), 24.0),
    ])
    .unwrap();
    let monthly = s.view(Frequency::Monthly).unwrap();
    assert_eq!(monthly.len(), 24);
    assert_eq!(monthly.time()[0], i64::from(i32::MIN) * 12);
    assert_eq!(monthly.time()[23], i64::from(i32::MAX) * 12 + 11);
    assert_eq!(monthly.value()[23], 1.0);
    assert_eq!(s.labels(Frequency::Monthly).unwrap()[23], format!("{}-12", i32::MAX));
}

#[test]
fn smallest_years_downsample_from_monthly() {
    let s = series(Frequency::Monthly, i32::MIN, i32::MIN);
    s.populate(vec![
        RawObservation::new(format!("{}-01", i32::MIN), 1.0),
        RawObservation::new(format!("{}-12", i32::MIN), 2.0),
    ])
    .unwrap();
    let annual = s.view(Frequency::Annual).unwrap();
    assert_eq!(annual.time(), &[i64::from(i32::MIN)]);
    assert_eq!(annual.value(), &[3.0]);
}

#[test]
fn downsampling_over_the_full_year_range_only_visits_observations() {
    let obs = [
        Observation::new(2000 * 12, 1.0),
        Observation::new(2000 * 12 + 1, 2.0),
        Observation::new(2010 * 12 + 11, 4.0),
    ];
    let out = resample(
        &obs,
        Frequency::Monthly,
        Frequency::Quarterly,
        AggregationPolicy::Average,
        i32::MIN,
        i32::MAX,
    )
    .unwrap();
    assert_eq!(out.time(), &[2000 * 4, 2010 * 4 + 3]);
    assert_eq!(out.value(), &[1.5, 4.0]);
}
