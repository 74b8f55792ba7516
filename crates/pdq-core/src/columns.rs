//! Canonical column labels.
//!
//! Source files use squashed labels (`Manufacturernumber`); everything past the
//! normalizer uses these names.

pub const MANUFACTURER_NUMBER: &str = "Manufacturer number";
pub const MANUFACTURER_NAME: &str = "Manufacturer name";
pub const ARTICLE_NUMBER: &str = "Article Number";

pub const SHORT_DESCRIPTION: &str = "Short description";
pub const SHORT_DESCRIPTION_2: &str = "Short description 2";
pub const LONG_DESCRIPTION: &str = "Long description";
pub const EAN: &str = "EAN";
pub const PICTURE_NORMAL_REDUCED: &str = "Picture normal reduced";
pub const TECHNICAL_DETAILS: &str = "Technical details";

pub const IS_COMPLETE: &str = "Is Complete";
pub const MISSING_FIELDS_COUNT: &str = "Missing Fields Count";
pub const DESCRIPTION_QUALITY: &str = "Description Quality";

/// Any one of these satisfies the "has description text" quality check.
pub const DESCRIPTION_TEXT_FIELDS: [&str; 3] =
    [SHORT_DESCRIPTION, SHORT_DESCRIPTION_2, LONG_DESCRIPTION];

/// Fields tracked by the completion-rate and missing-field reports, in report order.
pub const QUALITY_FIELDS: [&str; 6] = [
    SHORT_DESCRIPTION,
    SHORT_DESCRIPTION_2,
    LONG_DESCRIPTION,
    EAN,
    PICTURE_NORMAL_REDUCED,
    TECHNICAL_DETAILS,
];

/// Position of [`EAN`] within [`QUALITY_FIELDS`].
pub const EAN_FIELD_INDEX: usize = 3;

/// Columns appended to the joined columns when a scored table is exported.
pub const DERIVED_COLUMNS: [&str; 3] = [IS_COMPLETE, MISSING_FIELDS_COUNT, DESCRIPTION_QUALITY];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ean_index_points_at_ean() {
        assert_eq!(QUALITY_FIELDS[EAN_FIELD_INDEX], EAN);
    }
}
