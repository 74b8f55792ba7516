//! Headline counts and export subsets over scored tables.

use pdq_core::{DescriptionQuality, ScoreSummary, ScoredRecord, ScoredTable, Value};
use pretty_assertions::assert_eq;

fn record(missing: usize, quality: DescriptionQuality) -> ScoredRecord {
    let values = (0..3)
        .map(|i| (i >= missing).then(|| Value::from(format!("v{i}"))))
        .collect();
    ScoredRecord::new(values, quality)
}

fn table() -> ScoredTable {
    ScoredTable::new(
        vec!["a".into(), "b".into(), "c".into()],
        vec![
            record(0, DescriptionQuality::Good),
            record(1, DescriptionQuality::Good),
            record(1, DescriptionQuality::Bad),
            record(3, DescriptionQuality::Bad),
        ],
    )
}

#[test]
fn summary_counts_completeness_and_quality() {
    let summary = table().summary();
    assert_eq!(
        summary,
        ScoreSummary {
            total_records: 4,
            complete_records: 1,
            incomplete_records: 3,
            good_quality_records: 2,
            bad_quality_records: 2,
            missing_fields_distribution: [(0, 1), (1, 2), (3, 1)].into_iter().collect(),
        }
    );
}

#[test]
fn summary_serializes_distribution_in_ascending_order() {
    let json = serde_json::to_value(table().summary()).unwrap();
    let keys: Vec<&str> = json["missing_fields_distribution"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["0", "1", "3"]);
}

#[test]
fn quality_subsets_partition_the_table() {
    let scored = table();
    let good = scored.with_quality(DescriptionQuality::Good);
    let bad = scored.with_quality(DescriptionQuality::Bad);

    assert_eq!(good.len() + bad.len(), scored.len());
    assert_eq!(good.columns(), scored.columns());
    assert!(
        bad.records()
            .iter()
            .all(|r| r.description_quality() == DescriptionQuality::Bad)
    );
    assert_eq!(
        bad.output_columns().last().map(String::as_str),
        Some("Description Quality")
    );
}

#[test]
fn empty_table_summary_is_zeroed() {
    let empty = ScoredTable::new(vec!["a".into()], Vec::new());
    assert_eq!(empty.summary(), ScoreSummary::default());
    assert!(empty.with_quality(DescriptionQuality::Good).is_empty());
}
