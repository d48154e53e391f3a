//! Computation engine
//!
//! Derives [`ComputedTotals`] from a value set: per-row amounts, per-section
//! subtotals, grand subtotal, tax, final total. The template shape only
//! changes how rows are enumerated, never how they are summed.
//!
//! Malformed numeric operands degrade to zero so the preview stays
//! renderable mid-edit; aggregation never errors. This is a deliberate
//! policy, distinct from the strict numeric rule in validation.

use shared_types::{ComputedTotals, FieldValue, RowFormula, RowValues, SectionTotals, Template, ValueSet};

/// Field id carrying flat additional costs added to the grand subtotal.
pub const OTHER_COSTS_FIELD: &str = "otherCosts";
/// Field id carrying the tax rate as a percentage.
pub const TAX_RATE_FIELD: &str = "taxRatePercentage";
/// Field id carrying the currency symbol for display formatting.
pub const CURRENCY_FIELD: &str = "currency";

/// Recompute all derived totals from the current value set.
///
/// Pure and stateless; call it on every render. Disabled sections (toggle
/// falsy) are excluded entirely, and rows whose key field is empty are
/// skipped rather than counted as zero-amount rows.
pub fn compute_totals(template: &Template, values: &ValueSet) -> ComputedTotals {
    let mut sections = Vec::new();
    let mut items_subtotal = 0.0;

    for section in &template.sections {
        if !values.is_truthy(&section.toggle_id) {
            continue;
        }
        let rows = values.get_rows(&section.id).unwrap_or(&[]);
        let row_amounts: Vec<f64> = rows
            .iter()
            .filter(|row| row_has_key(row, &section.key_field))
            .map(|row| row_amount(&section.formula, row))
            .collect();
        let subtotal: f64 = row_amounts.iter().sum();
        items_subtotal += subtotal;
        sections.push(SectionTotals {
            section_id: section.id.clone(),
            row_amounts,
            subtotal,
        });
    }

    let other_costs = values.lenient_number(OTHER_COSTS_FIELD).unwrap_or(0.0);
    let grand_subtotal = items_subtotal + other_costs;
    let tax_rate = values.lenient_number(TAX_RATE_FIELD).unwrap_or(0.0);
    let tax_amount = grand_subtotal * (tax_rate / 100.0);

    ComputedTotals {
        sections,
        items_subtotal,
        other_costs,
        grand_subtotal,
        tax_rate,
        tax_amount,
        total: grand_subtotal + tax_amount,
    }
}

/// A row is included only when its identifying field is non-empty.
fn row_has_key(row: &RowValues, key_field: &str) -> bool {
    match row.get(key_field) {
        None => false,
        Some(FieldValue::Text(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn row_amount(formula: &RowFormula, row: &RowValues) -> f64 {
    match formula {
        RowFormula::Product {
            left,
            right,
            left_default,
        } => {
            // The declared default covers both absent and non-numeric left
            // operands (material quantity defaults to 1); otherwise a bad
            // operand is zero.
            let left = operand(row, left).or(*left_default).unwrap_or(0.0);
            let right = operand(row, right).unwrap_or(0.0);
            left * right
        }
        RowFormula::Direct { field } => operand(row, field).unwrap_or(0.0),
    }
}

fn operand(row: &RowValues, field: &str) -> Option<f64> {
    row.get(field).and_then(FieldValue::lenient_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{FieldSchema, SectionSchema};

    fn work_order() -> Template {
        Template {
            id: "work_order".into(),
            name: "Work Order".into(),
            description: String::new(),
            fields: vec![
                FieldSchema::number(OTHER_COSTS_FIELD, "Other Costs"),
                FieldSchema::number(TAX_RATE_FIELD, "Tax Rate (%)"),
            ],
            sections: vec![
                SectionSchema {
                    id: "workItems".into(),
                    label: "Work Description".into(),
                    toggle_id: "includeWorkDescriptionTable".into(),
                    key_field: "description".into(),
                    columns: vec![
                        FieldSchema::text("description", "Description"),
                        FieldSchema::number("area", "Area"),
                        FieldSchema::number("rate", "Rate"),
                    ],
                    formula: RowFormula::product("area", "rate"),
                },
                SectionSchema {
                    id: "materials".into(),
                    label: "Materials".into(),
                    toggle_id: "includeMaterialsTable".into(),
                    key_field: "name".into(),
                    columns: vec![
                        FieldSchema::text("name", "Material"),
                        FieldSchema::number("quantity", "Quantity"),
                        FieldSchema::number("pricePerUnit", "Price / Unit"),
                    ],
                    formula: RowFormula::product_with_default("quantity", "pricePerUnit", 1.0),
                },
                SectionSchema {
                    id: "labor".into(),
                    label: "Labor".into(),
                    toggle_id: "includeLaborTable".into(),
                    key_field: "teamName".into(),
                    columns: vec![
                        FieldSchema::text("teamName", "Team"),
                        FieldSchema::number("numPersons", "Persons"),
                        FieldSchema::number("amount", "Amount"),
                    ],
                    formula: RowFormula::direct("amount"),
                },
            ],
        }
    }

    fn row(pairs: &[(&str, FieldValue)]) -> RowValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_work_order_scenario() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeWorkDescriptionTable", true);
        values.insert(
            "workItems",
            vec![row(&[
                ("description", "Paint wall".into()),
                ("area", "100".into()),
                ("rate", "20".into()),
            ])],
        );
        values.insert(OTHER_COSTS_FIELD, 50.0);
        values.insert(TAX_RATE_FIELD, 10.0);

        let totals = compute_totals(&template, &values);
        assert_eq!(totals.section("workItems").unwrap().subtotal, 2000.0);
        assert_eq!(totals.grand_subtotal, 2050.0);
        assert_eq!(totals.tax_amount, 205.0);
        assert_eq!(totals.total, 2255.0);
    }

    #[test]
    fn test_malformed_operand_is_zero_not_error() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeWorkDescriptionTable", true);
        values.insert(
            "workItems",
            vec![row(&[
                ("description", "X".into()),
                ("area", "abc".into()),
                ("rate", "20".into()),
            ])],
        );

        let totals = compute_totals(&template, &values);
        let section = totals.section("workItems").unwrap();
        assert_eq!(section.row_amounts, vec![0.0]);
        assert!(section.subtotal == 0.0 && !section.subtotal.is_nan());
    }

    #[test]
    fn test_material_quantity_defaults_to_one() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeMaterialsTable", true);
        values.insert(
            "materials",
            vec![
                // Quantity absent: defaults to 1.
                row(&[("name", "Primer".into()), ("pricePerUnit", "300".into())]),
                // Quantity malformed: also defaults to 1.
                row(&[
                    ("name", "Paint".into()),
                    ("quantity", "??".into()),
                    ("pricePerUnit", "450".into()),
                ]),
            ],
        );

        let totals = compute_totals(&template, &values);
        assert_eq!(totals.section("materials").unwrap().row_amounts, vec![300.0, 450.0]);
    }

    #[test]
    fn test_labor_amount_is_direct_and_persons_informational() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeLaborTable", true);
        values.insert(
            "labor",
            vec![row(&[
                ("teamName", "Crew A".into()),
                ("numPersons", "4".into()),
                ("amount", "1200".into()),
            ])],
        );

        let totals = compute_totals(&template, &values);
        assert_eq!(totals.section("labor").unwrap().subtotal, 1200.0);
    }

    #[test]
    fn test_rows_with_empty_key_are_skipped() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeWorkDescriptionTable", true);
        values.insert(
            "workItems",
            vec![
                row(&[("description", "  ".into()), ("area", "100".into()), ("rate", "20".into())]),
                row(&[("area", "50".into()), ("rate", "10".into())]),
                row(&[("description", "Real".into()), ("area", "10".into()), ("rate", "5".into())]),
            ],
        );

        let totals = compute_totals(&template, &values);
        let section = totals.section("workItems").unwrap();
        // Only the row with a non-empty key contributes or appears.
        assert_eq!(section.row_amounts, vec![50.0]);
        assert_eq!(section.subtotal, 50.0);
    }

    #[test]
    fn test_disabled_toggle_excludes_section_with_valid_rows() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeWorkDescriptionTable", false);
        values.insert(
            "workItems",
            vec![row(&[
                ("description", "Paint wall".into()),
                ("area", "100".into()),
                ("rate", "20".into()),
            ])],
        );
        values.insert(TAX_RATE_FIELD, 10.0);

        let totals = compute_totals(&template, &values);
        assert!(totals.section("workItems").is_none());
        assert_eq!(totals.items_subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_row_order_does_not_change_totals() {
        let template = work_order();
        let rows = vec![
            row(&[("description", "A".into()), ("area", "3".into()), ("rate", "7".into())]),
            row(&[("description", "B".into()), ("area", "11".into()), ("rate", "13".into())]),
            row(&[("description", "C".into()), ("area", "0.5".into()), ("rate", "8".into())]),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();

        let mut forward = ValueSet::new();
        forward.insert("includeWorkDescriptionTable", true);
        forward.insert("workItems", rows);
        let mut backward = ValueSet::new();
        backward.insert("includeWorkDescriptionTable", true);
        backward.insert("workItems", reversed);

        let a = compute_totals(&template, &forward);
        let b = compute_totals(&template, &backward);
        assert_eq!(a.section("workItems").unwrap().subtotal, b.section("workItems").unwrap().subtotal);
        assert_eq!(a.total, b.total);
    }

    #[test]
    fn test_lenient_other_costs_and_tax_rate() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert(OTHER_COSTS_FIELD, "nonsense");
        values.insert(TAX_RATE_FIELD, "also nonsense");

        let totals = compute_totals(&template, &values);
        assert_eq!(totals.other_costs, 0.0);
        assert_eq!(totals.tax_rate, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_no_intermediate_rounding() {
        let template = work_order();
        let mut values = ValueSet::new();
        values.insert("includeWorkDescriptionTable", true);
        values.insert(
            "workItems",
            vec![row(&[
                ("description", "Fractional".into()),
                ("area", "0.333".into()),
                ("rate", "3".into()),
            ])],
        );

        let totals = compute_totals(&template, &values);
        // Full precision carried; display rounding is a separate step.
        assert_eq!(totals.grand_subtotal, 0.333 * 3.0);
    }
}
