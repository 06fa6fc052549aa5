//! Feature store — loading delimited sources from disk.

use std::io::Write;

use gridsight_analysis::features::FeatureStore;
use gridsight_core::config::FeatureConfig;
use gridsight_core::errors::FeatureError;
use gridsight_core::GridsightErrorCode;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn write_source(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

// ─── Tests ─────────────────────────────────────────────────────────────────

#[test]
fn timestamp_column_is_removed_and_rows_preserved() {
    let source = write_source(
        "timestamp,a,b\n\
         2024-03-01T00:00:00,1.0,2.0\n\
         2024-03-01T01:00:00,3.5,4.0\n\
         2024-03-01T02:00:00,5.0,-6.25\n",
    );
    let matrix = FeatureStore::new().load(source.path()).unwrap();
    assert_eq!(matrix.columns(), &["a".to_string(), "b".to_string()]);
    assert_eq!(matrix.row_count(), 3);
    assert_eq!(matrix.row(2), Some(&[5.0, -6.25][..]));
}

#[test]
fn only_text_columns_is_an_empty_feature_set() {
    let source = write_source(
        "timestamp,label\n\
         2024-03-01T00:00:00,normal\n\
         2024-03-01T01:00:00,spike\n",
    );
    let err = FeatureStore::new().load(source.path()).unwrap_err();
    assert!(matches!(err, FeatureError::EmptyFeatureSet { .. }), "got {err:?}");
    assert_eq!(err.error_code(), "EMPTY_FEATURE_SET");
}

#[test]
fn missing_source_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.csv");
    let err = FeatureStore::new().load(&path).unwrap_err();
    match err {
        FeatureError::NotFound { path: reported } => assert!(reported.ends_with("features.csv")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn load_does_not_modify_source() {
    let text = "timestamp,energy_usage,status\n2024-01-01,100,ok\n2024-01-02,130,high\n";
    let source = write_source(text);
    FeatureStore::new().load(source.path()).unwrap();
    assert_eq!(std::fs::read_to_string(source.path()).unwrap(), text);
}

#[test]
fn energy_export_keeps_numeric_sensor_columns() {
    let source = write_source(
        "timestamp,energy_usage,temperature,building,occupancy\n\
         2024-01-01 00:00,101.2,18.5,HQ,12\n\
         2024-01-01 01:00,99.8,18.1,HQ,9\n\
         2024-01-01 02:00,143.0,17.9,HQ,10\n",
    );
    let matrix = FeatureStore::new().load(source.path()).unwrap();
    assert_eq!(
        matrix.columns(),
        &[
            "energy_usage".to_string(),
            "temperature".to_string(),
            "occupancy".to_string()
        ]
    );
    assert_eq!(matrix.value(2, 0), Some(143.0));
}

#[test]
fn extra_timestamp_names_are_configurable() {
    let store = FeatureStore::with_config(FeatureConfig {
        timestamp_columns: vec!["timestamp".into(), "reading_epoch".into()],
        ..FeatureConfig::default()
    });
    let source = write_source("reading_epoch,kw\n1700000000,4.2\n1700000900,4.4\n");
    let matrix = store.load(source.path()).unwrap();
    assert_eq!(matrix.columns(), &["kw".to_string()]);
}
