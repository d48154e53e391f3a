//! Template and repeated-section descriptions
//!
//! A [`Template`] is one document kind: identity metadata, an ordered field
//! list, and the repeated sections whose rows feed the computation engine.
//! The catalog instances live in `template-engine`; this module only defines
//! the shape.

use serde::{Deserialize, Serialize};

use crate::field::FieldSchema;

/// How a row amount is derived from a row's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFormula {
    /// `left × right`. A missing or non-numeric operand counts as zero,
    /// except `left` falls back to `left_default` when one is declared
    /// (e.g. material quantity defaults to 1).
    Product {
        left: String,
        right: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        left_default: Option<f64>,
    },
    /// The amount is entered directly in one column (labor rows).
    Direct { field: String },
}

impl RowFormula {
    pub fn product(left: impl Into<String>, right: impl Into<String>) -> Self {
        RowFormula::Product {
            left: left.into(),
            right: right.into(),
            left_default: None,
        }
    }

    pub fn product_with_default(
        left: impl Into<String>,
        right: impl Into<String>,
        left_default: f64,
    ) -> Self {
        RowFormula::Product {
            left: left.into(),
            right: right.into(),
            left_default: Some(left_default),
        }
    }

    pub fn direct(field: impl Into<String>) -> Self {
        RowFormula::Direct {
            field: field.into(),
        }
    }
}

/// A toggle-guarded, ordered collection of uniform-shape rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSchema {
    /// Field id the row array lives under in the value set.
    pub id: String,
    /// Display heading for the rendered table.
    pub label: String,
    /// Boolean field guarding inclusion; a disabled section contributes
    /// nothing to any total.
    pub toggle_id: String,
    /// Column identifying a row; rows with an empty key are skipped.
    pub key_field: String,
    /// Column schemas, in display order.
    pub columns: Vec<FieldSchema>,
    pub formula: RowFormula,
}

/// One document kind: identity plus its fields and sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ordered flat fields. Order is display-relevant only.
    pub fields: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionSchema>,
}

impl Template {
    /// Catalog summary for listings.
    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            field_count: self.fields.len(),
            section_count: self.sections.len(),
        }
    }

    /// Every id the template claims in a value set: flat fields, section
    /// ids, and section toggles. Used by the catalog uniqueness check.
    pub fn claimed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.fields.iter().map(|f| f.id.as_str()).collect();
        for section in &self.sections {
            ids.push(section.id.as_str());
            ids.push(section.toggle_id.as_str());
        }
        ids
    }

    pub fn section(&self, id: &str) -> Option<&SectionSchema> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Summary row for the template list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub field_count: usize,
    pub section_count: usize,
}
