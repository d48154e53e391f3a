//! Validation and computation engine for FormDoc documents
//!
//! Two symmetric transformations over a template's field list:
//! - [`validate`]: build a validator program from field schemas and run raw
//!   form input through it, producing a normalized [`ValueSet`] or a full
//!   per-field error map.
//! - [`compute`]: derive the monetary aggregates (row amounts, section
//!   subtotals, tax, total) from a value set, under a deliberately lenient
//!   numeric policy so the preview is always renderable.
//!
//! Also home to money formatting and the file-to-data-URI resolver contract.

pub mod compute;
pub mod money;
pub mod resolver;
pub mod validate;

use serde_json::Map;
use shared_types::{ComputedTotals, FieldErrors, Template, ValueSet};

pub use compute::{compute_totals, CURRENCY_FIELD, OTHER_COSTS_FIELD, TAX_RATE_FIELD};
pub use money::format_money;
pub use resolver::{check_data_uri, resolve_file, ResolveError, MAX_FILE_BYTES};
pub use validate::{build_program, CoercionRule, FieldRule, SectionRule, ValidatorProgram};

/// Stateless engine entry point bundling validation and computation.
pub struct DocumentEngine;

impl DocumentEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validate raw form input against a template. All-or-nothing: either a
    /// fully coerced value set or the complete field error map.
    pub fn validate(
        &self,
        template: &Template,
        raw: &Map<String, serde_json::Value>,
    ) -> Result<ValueSet, FieldErrors> {
        ValidatorProgram::for_template(template).validate(raw)
    }

    /// Recompute derived totals from the current value set. Pure and
    /// stateless; malformed numeric input degrades to zero, never an error.
    pub fn compute(&self, template: &Template, values: &ValueSet) -> ComputedTotals {
        compute_totals(template, values)
    }
}

impl Default for DocumentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::{FieldSchema, RowFormula, SectionSchema};

    fn work_order_template() -> Template {
        Template {
            id: "work_order".to_string(),
            name: "Work Order".to_string(),
            description: "Itemized work order".to_string(),
            fields: vec![
                FieldSchema::text("clientName", "Client Name").required(),
                FieldSchema::number("otherCosts", "Other Costs"),
                FieldSchema::number("taxRatePercentage", "Tax Rate (%)"),
            ],
            sections: vec![SectionSchema {
                id: "workItems".to_string(),
                label: "Work Description".to_string(),
                toggle_id: "includeWorkDescriptionTable".to_string(),
                key_field: "description".to_string(),
                columns: vec![
                    FieldSchema::text("description", "Description"),
                    FieldSchema::number("area", "Area"),
                    FieldSchema::number("rate", "Rate"),
                ],
                formula: RowFormula::product("area", "rate"),
            }],
        }
    }

    #[test]
    fn test_validate_then_compute_is_idempotent() {
        let engine = DocumentEngine::new();
        let template = work_order_template();
        let raw = json!({
            "clientName": "Acme",
            "otherCosts": "50",
            "taxRatePercentage": "10",
            "includeWorkDescriptionTable": true,
            "workItems": [{"description": "Paint wall", "area": "100", "rate": "20"}],
        });
        let raw = raw.as_object().unwrap();

        let first = engine.validate(&template, raw).unwrap();
        let second = engine.validate(&template, raw).unwrap();
        assert_eq!(first, second);

        let totals_a = engine.compute(&template, &first);
        let totals_b = engine.compute(&template, &second);
        assert_eq!(totals_a, totals_b);
        assert_eq!(totals_a.total.to_bits(), totals_b.total.to_bits());
    }
}
