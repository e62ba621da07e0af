use macroseries_types::{
    AggregationPolicy, CollectionConfig, DerivedView, Frequency, RawObservation, RawValue,
    SeriesError,
};

const COLLECTION: &str = r#"
title = "Korea Data"
start_year = 1995
end_year = 2022
frequency = "M"
interval = 6

[source]
database = "IFS"
timeout_secs = 10

[[series]]
title = "Korea GDP"
frequency = "Q"
country = "KR"
indicator = "NGDP_SA_XDC"
aggregation = "sum"

[[series]]
title = "Korea policy rate"
frequency = "q"
country = "KR"
indicator = "FPOLM_PA"
"#;

#[test]
fn collection_file_parses_with_defaults() {
    let cfg: CollectionConfig = toml::from_str(COLLECTION).expect("parse collection");
    assert_eq!(cfg.frequency, Frequency::Monthly);
    assert_eq!(cfg.interval, 6);
    assert_eq!(cfg.source.timeout_secs, 10);
    assert_eq!(cfg.series.len(), 2);
    assert_eq!(cfg.series[0].aggregation, AggregationPolicy::Sum);
    assert_eq!(cfg.series[1].aggregation, AggregationPolicy::Average);
    assert_eq!(cfg.series[1].frequency, Frequency::Quarterly);
}

#[test]
fn display_frequency_defaults_to_native() {
    let cfg: CollectionConfig =
        toml::from_str("title = \"t\"\nstart_year = 2000\nend_year = 2001\n").expect("parse");
    assert_eq!(cfg.frequency, Frequency::Native);
    assert_eq!(cfg.interval, 1);
    assert!(cfg.series.is_empty());
}

#[test]
fn unknown_frequency_code_is_rejected_at_parse_time() {
    let bad = COLLECTION.replace("frequency = \"M\"", "frequency = \"W\"");
    let res: Result<CollectionConfig, _> = toml::from_str(&bad);
    assert!(res.is_err());
}

#[test]
fn raw_observation_accepts_string_or_number_values() {
    let json = r#"[{"period":"2010-Q1","value":"1.5"},{"period":"2010-Q2","value":2.5},{"period":"2010-Q3"}]"#;
    let recs: Vec<RawObservation> = serde_json::from_str(json).expect("deserialize records");
    assert_eq!(recs[0].value, Some(RawValue::Text("1.5".into())));
    assert_eq!(recs[1].value, Some(RawValue::Number(2.5)));
    assert!(!recs[2].is_complete());
}

#[test]
fn derived_view_serializes_as_columns() {
    let view = DerivedView::from_pairs([(2010, 1.0), (2011, 2.0)]);
    let json = serde_json::to_value(&view).expect("serialize view");
    assert_eq!(json["time"], serde_json::json!([2010, 2011]));
    assert_eq!(json["value"], serde_json::json!([1.0, 2.0]));
}

#[test]
fn error_roundtrip() {
    let err = SeriesError::malformed_label("2010Q1", "Q");
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: SeriesError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);
}
