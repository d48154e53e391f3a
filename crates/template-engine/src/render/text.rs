//! Plain-text document rendering
//!
//! Same content selection as the HTML renderer, formatted for terminals,
//! logs, and plain-text email bodies.

use formdoc_core::{format_money, CURRENCY_FIELD, OTHER_COSTS_FIELD, TAX_RATE_FIELD};
use shared_types::{ComputedTotals, FieldType, Template, ValueSet};

use super::{currency_symbol, row_included, scalar_display};

pub(super) fn render(
    template: &Template,
    values: &ValueSet,
    totals: &ComputedTotals,
) -> (String, Vec<String>) {
    let mut warnings = Vec::new();
    let symbol = currency_symbol(values).to_string();
    let mut out = String::with_capacity(2048);

    out.push_str(&format!("{}\n{}\n\n", template.name, "=".repeat(template.name.len())));

    for field in &template.fields {
        if field.id == OTHER_COSTS_FIELD || field.id == TAX_RATE_FIELD || field.id == CURRENCY_FIELD
        {
            continue;
        }
        match field.field_type {
            FieldType::File => match values.get_str(&field.id) {
                None | Some("") => {}
                Some(uri) if uri.starts_with("data:") => {
                    out.push_str(&format!("{}: [attached]\n", field.label));
                }
                Some(_) => warnings.push(format!(
                    "{} has not been resolved to embeddable content; omitted from preview",
                    field.label
                )),
            },
            FieldType::TextArea => {
                if let Some(text) = values.get_str(&field.id) {
                    if !text.trim().is_empty() {
                        out.push_str(&format!("{}:\n{}\n\n", field.label, text));
                    }
                }
            }
            _ => {
                if let Some(display) = scalar_display(values.get(&field.id)) {
                    if !display.is_empty() {
                        out.push_str(&format!("{}: {}\n", field.label, display));
                    }
                }
            }
        }
    }

    for section in &template.sections {
        if !values.is_truthy(&section.toggle_id) {
            continue;
        }
        let section_totals = totals.section(&section.id);
        out.push_str(&format!("\n{}\n{}\n", section.label, "-".repeat(section.label.len())));

        let rows = values.get_rows(&section.id).unwrap_or(&[]);
        let mut amounts = section_totals
            .map(|s| s.row_amounts.as_slice())
            .unwrap_or(&[])
            .iter();
        for row in rows.iter().filter(|r| row_included(r, &section.key_field)) {
            let cells: Vec<String> = section
                .columns
                .iter()
                .filter_map(|column| {
                    row.get(&column.id)
                        .map(Some)
                        .unwrap_or(column.default_value.as_ref())
                        .and_then(|v| scalar_display(Some(v)))
                })
                .collect();
            let amount = amounts.next().copied().unwrap_or(0.0);
            out.push_str(&format!(
                "  {}  =  {}\n",
                cells.join(" | "),
                format_money(&symbol, amount)
            ));
        }
        let subtotal = section_totals.map(|s| s.subtotal).unwrap_or(0.0);
        out.push_str(&format!("  Subtotal: {}\n", format_money(&symbol, subtotal)));
    }

    if !template.sections.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "Total Items Subtotal: {}\n",
            format_money(&symbol, totals.items_subtotal)
        ));
        out.push_str(&format!("Other Costs: {}\n", format_money(&symbol, totals.other_costs)));
        out.push_str(&format!(
            "Grand Subtotal: {}\n",
            format_money(&symbol, totals.grand_subtotal)
        ));
        out.push_str(&format!(
            "Tax ({}%): {}\n",
            totals.tax_rate,
            format_money(&symbol, totals.tax_amount)
        ));
        out.push_str(&format!("Total: {}\n", format_money(&symbol, totals.total)));
    }

    (out, warnings)
}
