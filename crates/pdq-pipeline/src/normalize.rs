//! Column renaming, bad-value nulling, whitespace trimming and key filtering.
//!
//! Order matters: bad tokens are matched against the raw text before trimming,
//! so `" "` is caught as a token rather than trimmed to `""`. A value that only
//! becomes a token once trimmed (`" n/a "`) is nulled as well, which keeps the
//! output free of tokens and makes a second pass a no-op.

use std::collections::BTreeSet;

use pdq_core::{Cell, DEFAULT_BAD_VALUES, Table, TableKind, Value};

/// Set of text tokens treated as null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadValues {
    tokens: BTreeSet<String>,
}

impl BadValues {
    /// Build a set from configured tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.tokens.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for BadValues {
    fn default() -> Self {
        Self::from_tokens(DEFAULT_BAD_VALUES)
    }
}

/// Clean one dataset using the rename map and key columns of its kind.
#[must_use]
pub fn normalize_kind(table: Table, kind: TableKind, bad_values: &BadValues) -> Table {
    let span = tracing::debug_span!("normalize", kind = %kind);
    let _guard = span.enter();
    normalize(table, kind.rename_map(), bad_values, kind.key_columns())
}

/// Rename, clean, trim, then drop rows missing any of `key_columns`.
#[must_use]
pub fn normalize(
    mut table: Table,
    rename: &[(&str, &str)],
    bad_values: &BadValues,
    key_columns: &[&str],
) -> Table {
    table.rename_columns(rename);
    let nulled = clean_cells(&mut table, bad_values);
    let dropped = drop_missing_keys(&mut table, key_columns);
    tracing::debug!(nulled, dropped, remaining = table.len(), "normalized table");
    table
}

/// Null bad tokens and trim text cells in place. Returns how many cells were nulled.
pub fn clean_cells(table: &mut Table, bad_values: &BadValues) -> usize {
    let mut nulled = 0;
    for cell in table.cells_mut() {
        if cell.is_none() {
            continue;
        }
        *cell = clean_cell(cell.take(), bad_values);
        if cell.is_none() {
            nulled += 1;
        }
    }
    nulled
}

/// Clean a single cell. Non-text values pass through untouched.
#[must_use]
pub fn clean_cell(cell: Cell, bad_values: &BadValues) -> Cell {
    match cell? {
        Value::Text(raw) => {
            if bad_values.contains(&raw) {
                return None;
            }
            let trimmed = raw.trim();
            if bad_values.contains(trimmed) {
                None
            } else if trimmed.len() == raw.len() {
                Some(Value::Text(raw))
            } else {
                Some(Value::Text(trimmed.to_string()))
            }
        }
        other => Some(other),
    }
}

/// Remove rows with a null in any key column. A key column the table lacks
/// counts as null for every row. Returns the number of rows removed.
pub fn drop_missing_keys(table: &mut Table, key_columns: &[&str]) -> usize {
    let positions: Option<Vec<usize>> = key_columns
        .iter()
        .map(|key| table.column_index(key))
        .collect();
    match positions {
        Some(positions) => table.retain_rows(|row| positions.iter().all(|&i| row[i].is_some())),
        None => {
            tracing::warn!(?key_columns, "key column absent; dropping every row");
            table.retain_rows(|_| false)
        }
    }
}

#[cfg(test)]
mod tests {
    use pdq_core::columns::{ARTICLE_NUMBER, MANUFACTURER_NUMBER};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn text(s: &str) -> Cell {
        Some(Value::from(s))
    }

    fn property_table() -> Table {
        Table::from_rows(
            vec![
                "Manufacturernumber".into(),
                "Articlenumber".into(),
                "Color".into(),
            ],
            vec![
                vec![text("M1"), text("A1"), text("  red ")],
                vec![text("M1"), text("n/a"), text("blue")],
                vec![text(" "), text("A3"), text("-")],
                vec![text("M2"), text("A4"), text(" NULL ")],
            ],
        )
        .unwrap()
    }

    #[rstest]
    #[case("N/A")]
    #[case("n/a")]
    #[case("None")]
    #[case("none")]
    #[case("")]
    #[case(" ")]
    #[case("-")]
    #[case("nan")]
    #[case("NaN")]
    #[case("null")]
    #[case("NULL")]
    #[case("'")]
    fn default_tokens_become_null(#[case] token: &str) {
        assert_eq!(clean_cell(text(token), &BadValues::default()), None);
    }

    #[rstest]
    #[case("NONE")]
    #[case("Nil")]
    #[case("--")]
    #[case("0")]
    fn other_values_survive(#[case] value: &str) {
        assert_eq!(clean_cell(text(value), &BadValues::default()), text(value));
    }

    #[test]
    fn whitespace_is_trimmed_from_text_only() {
        let bad = BadValues::default();
        assert_eq!(clean_cell(text("  drill \t"), &bad), text("drill"));
        assert_eq!(clean_cell(Some(Value::from(7_i64)), &bad), Some(Value::from(7_i64)));
        assert_eq!(clean_cell(Some(Value::from(2.5)), &bad), Some(Value::from(2.5)));
    }

    #[test]
    fn tokens_revealed_by_trimming_are_nulled() {
        let bad = BadValues::default();
        assert_eq!(clean_cell(text(" n/a "), &bad), None);
        assert_eq!(clean_cell(text("   "), &bad), None);
    }

    #[test]
    fn property_rows_without_both_keys_are_dropped() {
        let table = normalize_kind(property_table(), TableKind::Property, &BadValues::default());

        assert_eq!(
            table.columns(),
            [MANUFACTURER_NUMBER, ARTICLE_NUMBER, "Color"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "Color"), Some(&Value::from("red")));
        assert_eq!(table.get(1, ARTICLE_NUMBER), Some(&Value::from("A4")));
        assert_eq!(table.get(1, "Color"), None);
    }

    #[test]
    fn output_contains_no_bad_tokens() {
        let bad = BadValues::default();
        let table = normalize_kind(property_table(), TableKind::Property, &bad);
        for cell in table.cells().flatten() {
            if let Some(s) = cell.as_text() {
                assert!(!bad.contains(s), "token {s:?} survived normalization");
            }
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let bad = BadValues::default();
        let once = normalize_kind(property_table(), TableKind::Property, &bad);
        let twice = normalize_kind(once.clone(), TableKind::Property, &bad);
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_key_column_drops_everything() {
        let table = Table::from_rows(vec!["Other".into()], vec![vec![text("x")]]).unwrap();
        let table = normalize_kind(table, TableKind::Description, &BadValues::default());
        assert!(table.is_empty());
    }

    #[test]
    fn custom_token_set_is_respected() {
        let bad = BadValues::from_tokens(["unknown"]);
        assert_eq!(clean_cell(text("unknown"), &bad), None);
        assert_eq!(clean_cell(text("n/a"), &bad), text("n/a"));
        assert_eq!(bad.len(), 1);
    }
}
