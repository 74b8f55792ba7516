//! Inner joins over normalized tables.
//!
//! Left rows are emitted in order; each is followed by every matching right row
//! in right-table order, so duplicate keys fan out into the full cross-product.
//! Unmatched rows on either side disappear. Null keys never match.

use std::collections::{HashMap, HashSet};

use pdq_core::columns::{ARTICLE_NUMBER, MANUFACTURER_NUMBER};
use pdq_core::{Cell, JoinKey, Table};

use crate::PipelineError;

/// Suffixes for non-key columns present on both sides of a join.
const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Join properties with descriptions on article, then with manufacturers on manufacturer.
///
/// # Errors
///
/// Returns [`PipelineError::MissingColumn`] if a join key column is absent from
/// any input.
pub fn join(
    properties: &Table,
    descriptions: &Table,
    manufacturers: &Table,
) -> Result<Table, PipelineError> {
    let with_descriptions = inner_join(
        properties,
        descriptions,
        ARTICLE_NUMBER,
        ("property", "description"),
    )?;
    tracing::debug!(rows = with_descriptions.len(), "joined properties with descriptions");

    let joined = inner_join(
        &with_descriptions,
        manufacturers,
        MANUFACTURER_NUMBER,
        ("property+description", "manufacturer"),
    )?;
    tracing::debug!(rows = joined.len(), "joined with manufacturers");
    Ok(joined)
}

/// Inner join `left` and `right` on the column `key`.
///
/// Output columns are the left columns followed by the right columns minus
/// `key`. Names present on both sides get `_x` / `_y` suffixes.
///
/// # Errors
///
/// Returns [`PipelineError::MissingColumn`] if `key` is absent from either side.
pub fn inner_join(
    left: &Table,
    right: &Table,
    key: &str,
    labels: (&str, &str),
) -> Result<Table, PipelineError> {
    let left_key = key_index(left, key, labels.0)?;
    let right_key = key_index(right, key, labels.1)?;

    let right_keep: Vec<usize> = (0..right.columns().len())
        .filter(|&i| i != right_key)
        .collect();
    let columns = joined_columns(left, right, &right_keep);

    let mut index: HashMap<JoinKey, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows().iter().enumerate() {
        if let Some(value) = &row[right_key] {
            index.entry(value.join_key()).or_default().push(i);
        }
    }

    let mut rows = Vec::new();
    for left_row in left.rows() {
        let Some(value) = &left_row[left_key] else {
            continue;
        };
        let Some(matches) = index.get(&value.join_key()) else {
            continue;
        };
        for &m in matches {
            let right_row = &right.rows()[m];
            let mut row: Vec<Cell> = Vec::with_capacity(columns.len());
            row.extend(left_row.iter().cloned());
            row.extend(right_keep.iter().map(|&i| right_row[i].clone()));
            rows.push(row);
        }
    }

    Ok(Table::from_rows(columns, rows)?)
}

fn key_index(table: &Table, key: &str, label: &str) -> Result<usize, PipelineError> {
    table
        .column_index(key)
        .ok_or_else(|| PipelineError::MissingColumn {
            table: label.to_string(),
            column: key.to_string(),
        })
}

fn joined_columns(left: &Table, right: &Table, right_keep: &[usize]) -> Vec<String> {
    let left_names: HashSet<&str> = left.columns().iter().map(String::as_str).collect();
    let right_names: HashSet<&str> = right_keep
        .iter()
        .map(|&i| right.columns()[i].as_str())
        .collect();

    let left_cols = left.columns().iter().map(|c| {
        if right_names.contains(c.as_str()) {
            format!("{c}{LEFT_SUFFIX}")
        } else {
            c.clone()
        }
    });
    let right_cols = right_keep.iter().map(|&i| {
        let c = &right.columns()[i];
        if left_names.contains(c.as_str()) {
            format!("{c}{RIGHT_SUFFIX}")
        } else {
            c.clone()
        }
    });
    left_cols.chain(right_cols).collect()
}

#[cfg(test)]
mod tests {
    use pdq_core::Value;
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(s: &str) -> Cell {
        Some(Value::from(s))
    }

    fn table(columns: &[&str], rows: &[&[Option<&str>]]) -> Table {
        Table::from_rows(
            columns.iter().map(|c| (*c).to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.map(Value::from)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn manufacturers() -> Table {
        table(
            &[MANUFACTURER_NUMBER, "Manufacturer name"],
            &[&[Some("M1"), Some("Acme")]],
        )
    }

    #[test]
    fn unmatched_property_is_dropped() {
        let properties = table(
            &[MANUFACTURER_NUMBER, ARTICLE_NUMBER],
            &[&[Some("M1"), Some("A1")], &[Some("M1"), Some("A2")]],
        );
        let descriptions = table(&[ARTICLE_NUMBER, "EAN"], &[&[Some("A1"), Some("400")]]);

        let joined = join(&properties, &descriptions, &manufacturers()).unwrap();

        assert_eq!(joined.len(), 1);
        assert_eq!(
            joined.columns(),
            [MANUFACTURER_NUMBER, ARTICLE_NUMBER, "EAN", "Manufacturer name"]
        );
        assert_eq!(
            joined.rows()[0],
            vec![text("M1"), text("A1"), text("400"), text("Acme")]
        );
    }

    #[test]
    fn duplicate_keys_fan_out() {
        let properties = table(
            &[MANUFACTURER_NUMBER, ARTICLE_NUMBER],
            &[&[Some("M1"), Some("A1")], &[Some("M1"), Some("A1")]],
        );
        let descriptions = table(
            &[ARTICLE_NUMBER, "Short description"],
            &[&[Some("A1"), Some("first")], &[Some("A1"), Some("second")]],
        );

        let joined = join(&properties, &descriptions, &manufacturers()).unwrap();

        assert_eq!(joined.len(), 4);
        let descs: Vec<_> = (0..4)
            .map(|i| joined.get(i, "Short description").cloned())
            .collect();
        assert_eq!(
            descs,
            vec![text("first"), text("second"), text("first"), text("second")]
        );
    }

    #[test]
    fn null_keys_never_match() {
        let left = table(&["k", "a"], &[&[None, Some("1")]]);
        let right = table(&["k", "b"], &[&[None, Some("2")]]);
        let joined = inner_join(&left, &right, "k", ("left", "right")).unwrap();
        assert!(joined.is_empty());
    }

    #[test]
    fn colliding_columns_get_suffixes() {
        let left = table(&["k", "Note"], &[&[Some("1"), Some("left")]]);
        let right = table(&["k", "Note"], &[&[Some("1"), Some("right")]]);
        let joined = inner_join(&left, &right, "k", ("left", "right")).unwrap();
        assert_eq!(joined.columns(), ["k", "Note_x", "Note_y"]);
        assert_eq!(joined.get(0, "Note_y"), Some(&Value::from("right")));
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let properties = table(&[MANUFACTURER_NUMBER], &[&[Some("M1")]]);
        let descriptions = table(&[ARTICLE_NUMBER], &[&[Some("A1")]]);
        let err = join(&properties, &descriptions, &manufacturers()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingColumn { ref column, .. } if column == ARTICLE_NUMBER
        ));
    }

    #[test]
    fn empty_inputs_join_to_empty() {
        let properties = table(&[MANUFACTURER_NUMBER, ARTICLE_NUMBER], &[]);
        let descriptions = table(&[ARTICLE_NUMBER], &[]);
        let joined = join(&properties, &descriptions, &manufacturers()).unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.columns().len(), 3);
    }

    #[test]
    fn joined_keys_match_sources() {
        let properties = table(
            &[MANUFACTURER_NUMBER, ARTICLE_NUMBER],
            &[
                &[Some("M1"), Some("A1")],
                &[Some("M9"), Some("A1")],
                &[Some("M1"), Some("A7")],
            ],
        );
        let descriptions = table(&[ARTICLE_NUMBER], &[&[Some("A1")], &[Some("A7")]]);
        let joined = join(&properties, &descriptions, &manufacturers()).unwrap();

        assert_eq!(joined.len(), 2);
        for i in 0..joined.len() {
            assert_eq!(joined.get(i, MANUFACTURER_NUMBER), Some(&Value::from("M1")));
            assert!(joined.get(i, ARTICLE_NUMBER).is_some());
        }
    }
}
