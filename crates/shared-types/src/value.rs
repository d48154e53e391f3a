//! Normalized field values and value sets
//!
//! A [`ValueSet`] is the runtime state of one document instance: a mapping
//! from field id to a normalized value. Repeated sections store an ordered
//! sequence of rows, each row a map from column name to a scalar value.
//! Values serialize untagged so a stored draft reads as natural JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of a repeated section. Column name to scalar value.
pub type RowValues = BTreeMap<String, FieldValue>;

/// Per-field validation errors: field id to human-readable message.
/// Non-empty by construction when returned from a validator.
pub type FieldErrors = BTreeMap<String, String>;

/// A normalized field value.
///
/// Dates, emails, select values and data URIs normalize to `Text`. Variant
/// order matters: untagged deserialization tries bools before numbers before
/// strings before row arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Rows(Vec<RowValues>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&[RowValues]> {
        match self {
            FieldValue::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Read the value as a number under the aggregation leniency policy:
    /// numbers pass through, numeric-looking text parses, everything else
    /// (including malformed text) is `None` for the caller to default.
    pub fn lenient_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Truthiness for section toggles: booleans as-is, nonzero numbers,
    /// and the usual affirmative strings.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0,
            FieldValue::Text(s) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
            }
            FieldValue::Rows(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<RowValues>> for FieldValue {
    fn from(rows: Vec<RowValues>) -> Self {
        FieldValue::Rows(rows)
    }
}

/// Parse a numeric-looking string. Accepts surrounding whitespace and digit
/// group commas ("1,200.50"). Returns `None` for anything else, including
/// non-finite results.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The normalized, coerced data for one document instance.
///
/// Absent optional fields are absent from the map, never `null` or `NaN`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSet(BTreeMap<String, FieldValue>);

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.0.get(id)
    }

    pub fn get_str(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(FieldValue::as_str)
    }

    pub fn get_number(&self, id: &str) -> Option<f64> {
        self.get(id).and_then(FieldValue::as_number)
    }

    pub fn get_bool(&self, id: &str) -> Option<bool> {
        self.get(id).and_then(FieldValue::as_bool)
    }

    pub fn get_rows(&self, id: &str) -> Option<&[RowValues]> {
        self.get(id).and_then(FieldValue::as_rows)
    }

    /// Lenient numeric read of a field (see [`FieldValue::lenient_number`]).
    pub fn lenient_number(&self, id: &str) -> Option<f64> {
        self.get(id).and_then(FieldValue::lenient_number)
    }

    /// Toggle truthiness; an absent field is false.
    pub fn is_truthy(&self, id: &str) -> bool {
        self.get(id).map(FieldValue::is_truthy).unwrap_or(false)
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<FieldValue> {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldValue)> for ValueSet {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
