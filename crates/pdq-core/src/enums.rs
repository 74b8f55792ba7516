//! Dataset kinds and quality labels.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;
use crate::columns::{ARTICLE_NUMBER, MANUFACTURER_NAME, MANUFACTURER_NUMBER};

// ---------------------------------------------------------------------------
// TableKind
// ---------------------------------------------------------------------------

/// One of the three source datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Manufacturer,
    Description,
    Property,
}

impl TableKind {
    /// All kinds in load order.
    pub const ALL: [Self; 3] = [Self::Manufacturer, Self::Description, Self::Property];

    /// Source label → canonical label for this dataset.
    #[must_use]
    pub const fn rename_map(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Manufacturer => &[
                ("Manufacturernumber", MANUFACTURER_NUMBER),
                ("Manufacturername", MANUFACTURER_NAME),
            ],
            Self::Description => &[("Articlenumber", ARTICLE_NUMBER)],
            Self::Property => &[
                ("Manufacturernumber", MANUFACTURER_NUMBER),
                ("Articlenumber", ARTICLE_NUMBER),
            ],
        }
    }

    /// Columns that must be non-null for a row to take part in a join.
    #[must_use]
    pub const fn key_columns(self) -> &'static [&'static str] {
        match self {
            Self::Manufacturer => &[MANUFACTURER_NUMBER],
            Self::Description => &[ARTICLE_NUMBER],
            Self::Property => &[MANUFACTURER_NUMBER, ARTICLE_NUMBER],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturer",
            Self::Description => "description",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DescriptionQuality
// ---------------------------------------------------------------------------

/// Binary description-quality label of a scored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionQuality {
    Good,
    Bad,
}

impl DescriptionQuality {
    /// String stored in the `Description Quality` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for DescriptionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DescriptionQuality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "bad" => Ok(Self::Bad),
            other => Err(CoreError::Validation(format!(
                "unknown description quality '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_keys_cover_both_join_columns() {
        assert_eq!(
            TableKind::Property.key_columns(),
            [MANUFACTURER_NUMBER, ARTICLE_NUMBER]
        );
        assert_eq!(TableKind::Description.key_columns(), [ARTICLE_NUMBER]);
        assert_eq!(TableKind::Manufacturer.key_columns(), [MANUFACTURER_NUMBER]);
    }

    #[test]
    fn rename_maps_target_canonical_labels() {
        for kind in TableKind::ALL {
            for (_, to) in kind.rename_map() {
                assert!(
                    [MANUFACTURER_NUMBER, MANUFACTURER_NAME, ARTICLE_NUMBER].contains(to),
                    "{kind} renames to non-canonical {to}"
                );
            }
        }
    }

    #[test]
    fn quality_serde_is_lowercase() {
        let json = serde_json::to_string(&DescriptionQuality::Good).unwrap();
        assert_eq!(json, "\"good\"");
        let recovered: DescriptionQuality = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(recovered, DescriptionQuality::Bad);
    }

    #[test]
    fn quality_parses_from_column_text() {
        assert_eq!("good".parse::<DescriptionQuality>().unwrap(), DescriptionQuality::Good);
        assert!("GOOD".parse::<DescriptionQuality>().is_err());
    }
}
