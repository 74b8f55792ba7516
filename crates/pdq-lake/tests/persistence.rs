//! File-backed lakes keep the last loaded run across connections.

use pdq_core::columns::{EAN, MANUFACTURER_NAME};
use pdq_core::{DescriptionQuality, ScoredRecord, ScoredTable, Value};
use pdq_lake::{LakeError, ProductLake};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn scored() -> ScoredTable {
    let row = |name: &str, ean: Option<&str>, quality| {
        ScoredRecord::new(vec![Some(Value::from(name)), ean.map(Value::from)], quality)
    };
    ScoredTable::new(
        vec![MANUFACTURER_NAME.to_string(), EAN.to_string()],
        vec![
            row("Acme", Some("400100"), DescriptionQuality::Bad),
            row("Acme", None, DescriptionQuality::Bad),
            row("Bosch", Some("400300"), DescriptionQuality::Good),
        ],
    )
}

#[test]
fn reopened_lake_answers_reports() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("lake.duckdb");

    {
        let mut lake = ProductLake::open_local(&path).expect("open new lake");
        assert_eq!(lake.load_scored(&scored()).unwrap(), 3);
    }
    assert!(path.exists());

    let lake = ProductLake::open_local(&path).expect("reopen lake");
    assert_eq!(lake.record_count().unwrap(), 3);

    let report = lake.quality_report().unwrap();
    assert_eq!(report.manufacturer_quality[0].manufacturer_name.as_deref(), Some("Acme"));
    assert_eq!(report.manufacturer_quality[0].bad_quality_percentage, 100.0);
    assert_eq!(report.missing_fields.missing_ean, 1);
    assert_eq!(report.missing_fields.missing_short_desc, 3);
    assert_eq!(
        report
            .best_manufacturer
            .and_then(|b| b.manufacturer_name),
        Some("Bosch".to_string())
    );
}

#[test]
fn fresh_file_is_not_initialized() {
    let dir = TempDir::new().unwrap();
    let lake = ProductLake::open_local(&dir.path().join("empty.duckdb")).unwrap();
    assert!(matches!(
        lake.missing_field_tally(),
        Err(LakeError::NotInitialized(_))
    ));
}
