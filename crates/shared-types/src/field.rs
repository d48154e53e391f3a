//! Field schema types
//!
//! A [`FieldSchema`] is the declarative description of one input slot on a
//! document template: its type, display label, default, required-ness, and
//! (for selects) the allowed options. The type is a closed enum so that the
//! validator and the renderer match on it exhaustively.

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Input slot type. Determines the coercion rule and default-value policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    TextArea,
    Date,
    Number,
    Email,
    Boolean,
    File,
    Select,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::TextArea => "textarea",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Boolean => "boolean",
            FieldType::File => "file",
            FieldType::Select => "select",
        };
        write!(f, "{}", name)
    }
}

/// One entry in a select field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The stored value; the coerced field value must equal one of these.
    pub value: String,
    /// Display label, not semantically load-bearing.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one input slot on a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Unique within a template (enforced by a catalog-wide test).
    pub id: String,
    /// Display name.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    /// Ordered option list; only meaningful for `Select`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FieldSchema {
    /// Create a schema with the given type and no constraints.
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            required: false,
            default_value: None,
            options: Vec::new(),
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Text)
    }

    pub fn textarea(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::TextArea)
    }

    pub fn date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Date)
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Number)
    }

    pub fn email(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Email)
    }

    pub fn boolean(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Boolean)
    }

    pub fn file(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::File)
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let mut schema = Self::new(id, label, FieldType::Select);
        schema.options = options;
        schema
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value used when seeding a fresh document.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_sets_type_and_flags() {
        let field = FieldSchema::email("clientEmail", "Client Email").required();
        assert_eq!(field.field_type, FieldType::Email);
        assert!(field.required);
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_field_type_serializes_lowercase() {
        let json = serde_json::to_string(&FieldType::TextArea).unwrap();
        assert_eq!(json, "\"textarea\"");
        let back: FieldType = serde_json::from_str("\"select\"").unwrap();
        assert_eq!(back, FieldType::Select);
    }

    #[test]
    fn test_select_options_preserve_order() {
        let field = FieldSchema::select(
            "unit",
            "Unit",
            vec![
                SelectOption::new("Pcs", "Pieces"),
                SelectOption::new("Kg", "Kilograms"),
            ],
        );
        let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Pcs", "Kg"]);
    }
}
