//! Scalar cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-null cell value.
///
/// Datasets read from flat files arrive as [`Value::Text`]; typed collaborators
/// may hand over numeric cells, which the normalizer never trims or nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A nullable cell. `None` is the null marker.
pub type Cell = Option<Value>;

impl Value {
    /// Borrow the text payload, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) | Self::Float(_) => None,
        }
    }

    /// Hashable identity used to match rows across tables.
    #[must_use]
    pub fn join_key(&self) -> JoinKey {
        match self {
            Self::Integer(v) => JoinKey::Integer(*v),
            // -0.0 + 0.0 folds negative zero so both zeros share a key
            Self::Float(v) => JoinKey::Float((*v + 0.0).to_bits()),
            Self::Text(s) => JoinKey::Text(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Join identity of a [`Value`]. Keys of different variants never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Integer(i64),
    Float(u64),
    Text(String),
}
