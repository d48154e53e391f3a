//! HTML document rendering

use formdoc_core::{format_money, CURRENCY_FIELD, OTHER_COSTS_FIELD, TAX_RATE_FIELD};
use shared_types::{ComputedTotals, FieldSchema, FieldType, Template, ValueSet};

use super::{currency_symbol, row_included, scalar_display};

const STYLE: &str = "<style>
body { font-family: Georgia, 'Times New Roman', serif; color: #1a1a1a; max-width: 760px; margin: 2rem auto; }
h1 { border-bottom: 2px solid #1a1a1a; padding-bottom: .3rem; }
h2 { margin-top: 1.5rem; }
table { border-collapse: collapse; width: 100%; margin: .5rem 0; }
table.meta th { text-align: left; width: 14rem; font-weight: normal; color: #555; }
table.items th, table.items td { border: 1px solid #999; padding: .3rem .5rem; }
table.totals { width: auto; margin-left: auto; }
table.totals td { padding: .2rem .8rem; }
td.num { text-align: right; white-space: nowrap; }
tr.grand td { font-weight: bold; border-top: 1px solid #1a1a1a; }
img.figure { max-height: 90px; }
.label { display: block; font-size: .85rem; color: #555; }
</style>
";

pub(super) fn render(
    template: &Template,
    values: &ValueSet,
    totals: &ComputedTotals,
) -> (String, Vec<String>) {
    let mut warnings = Vec::new();
    let symbol = currency_symbol(values).to_string();
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", esc(&template.name)));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");

    // Logo-style images sit above the heading, letterhead fashion.
    for field in file_fields(template, |id| id.to_lowercase().contains("logo")) {
        push_file(&mut out, &mut warnings, field, values);
    }
    out.push_str(&format!("<h1>{}</h1>\n", esc(&template.name)));

    // Flat scalar fields as a label/value table. Monetary inputs appear in
    // the totals block instead.
    out.push_str("<table class=\"meta\">\n");
    for field in &template.fields {
        if is_totals_input(&field.id) {
            continue;
        }
        if matches!(field.field_type, FieldType::File | FieldType::TextArea) {
            continue;
        }
        if let Some(display) = scalar_display(values.get(&field.id)) {
            if !display.is_empty() {
                out.push_str(&format!(
                    "<tr><th>{}</th><td>{}</td></tr>\n",
                    esc(&field.label),
                    esc(&display)
                ));
            }
        }
    }
    out.push_str("</table>\n");

    // Enabled sections, with the engine's row-inclusion rule and its
    // precomputed amounts.
    for section in &template.sections {
        if !values.is_truthy(&section.toggle_id) {
            continue;
        }
        let section_totals = totals.section(&section.id);
        out.push_str(&format!("<h2>{}</h2>\n<table class=\"items\">\n<thead><tr>", esc(&section.label)));
        for column in &section.columns {
            out.push_str(&format!("<th>{}</th>", esc(&column.label)));
        }
        out.push_str("<th>Amount</th></tr></thead>\n<tbody>\n");

        let rows = values.get_rows(&section.id).unwrap_or(&[]);
        let mut amounts = section_totals
            .map(|s| s.row_amounts.as_slice())
            .unwrap_or(&[])
            .iter();
        for row in rows.iter().filter(|r| row_included(r, &section.key_field)) {
            out.push_str("<tr class=\"row\">");
            for column in &section.columns {
                let cell = row
                    .get(&column.id)
                    .map(Some)
                    .unwrap_or(column.default_value.as_ref())
                    .and_then(|v| scalar_display(Some(v)))
                    .unwrap_or_default();
                out.push_str(&format!("<td>{}</td>", esc(&cell)));
            }
            let amount = amounts.next().copied().unwrap_or(0.0);
            out.push_str(&format!(
                "<td class=\"num\">{}</td></tr>\n",
                esc(&format_money(&symbol, amount))
            ));
        }
        out.push_str("</tbody>\n");

        let subtotal = section_totals.map(|s| s.subtotal).unwrap_or(0.0);
        out.push_str(&format!(
            "<tfoot><tr><td colspan=\"{}\">Subtotal</td><td class=\"num\">{}</td></tr></tfoot>\n</table>\n",
            section.columns.len(),
            esc(&format_money(&symbol, subtotal))
        ));
    }

    // Totals block only for monetary templates.
    if !template.sections.is_empty() {
        out.push_str("<table class=\"totals\">\n");
        push_total(&mut out, &symbol, "Total Items Subtotal", totals.items_subtotal, false);
        push_total(&mut out, &symbol, "Other Costs", totals.other_costs, false);
        push_total(&mut out, &symbol, "Grand Subtotal", totals.grand_subtotal, false);
        push_total(
            &mut out,
            &symbol,
            &format!("Tax ({}%)", totals.tax_rate),
            totals.tax_amount,
            false,
        );
        push_total(&mut out, &symbol, "Total", totals.total, true);
        out.push_str("</table>\n");
    }

    // Long-form blocks (notes, declarations, letter bodies).
    for field in &template.fields {
        if field.field_type != FieldType::TextArea {
            continue;
        }
        if let Some(text) = values.get_str(&field.id) {
            if !text.trim().is_empty() {
                out.push_str(&format!(
                    "<div class=\"block\"><span class=\"label\">{}</span>{}</div>\n",
                    esc(&field.label),
                    paragraphs(text)
                ));
            }
        }
    }

    // Remaining embedded files (signatures) close the document.
    for field in file_fields(template, |id| !id.to_lowercase().contains("logo")) {
        push_file(&mut out, &mut warnings, field, values);
    }

    out.push_str("</body>\n</html>\n");
    (out, warnings)
}

fn file_fields<'a>(
    template: &'a Template,
    pick: impl Fn(&str) -> bool + 'a,
) -> impl Iterator<Item = &'a FieldSchema> {
    template
        .fields
        .iter()
        .filter(move |f| f.field_type == FieldType::File && pick(&f.id))
}

fn push_file(out: &mut String, warnings: &mut Vec<String>, field: &FieldSchema, values: &ValueSet) {
    match values.get_str(&field.id) {
        None | Some("") => {}
        Some(uri) if uri.starts_with("data:image/") => {
            out.push_str(&format!(
                "<div><span class=\"label\">{}</span><img class=\"figure\" src=\"{}\" alt=\"{}\"></div>\n",
                esc(&field.label),
                esc(uri),
                esc(&field.label)
            ));
        }
        Some(uri) if uri.starts_with("data:") => {
            // Embeddable but not an image; note its presence.
            out.push_str(&format!("<p class=\"label\">{}: attached</p>\n", esc(&field.label)));
        }
        Some(_) => warnings.push(format!(
            "{} has not been resolved to embeddable content; omitted from preview",
            field.label
        )),
    }
}

fn push_total(out: &mut String, symbol: &str, label: &str, amount: f64, grand: bool) {
    let class = if grand { " class=\"grand\"" } else { "" };
    out.push_str(&format!(
        "<tr{}><td>{}</td><td class=\"num\">{}</td></tr>\n",
        class,
        esc(label),
        esc(&format_money(symbol, amount))
    ));
}

/// Monetary inputs surfaced by the totals block rather than the field table.
fn is_totals_input(id: &str) -> bool {
    id == OTHER_COSTS_FIELD || id == TAX_RATE_FIELD || id == CURRENCY_FIELD
}

fn paragraphs(text: &str) -> String {
    let body = esc(text).replace('\n', "<br>");
    format!("<p>{}</p>", body)
}

fn esc(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
