//! Default-value seeding behind an injected clock
//!
//! Document numbers and default dates derive from "now", so the clock is a
//! capability handed to the catalog rather than read inline. Production uses
//! [`SystemClock`]; tests pin a [`FixedClock`] and get deterministic seeds.

use chrono::{Local, NaiveDate};

use formdoc_core::validate::normalize_date;
use shared_types::{FieldType, RowValues, Template, ValueSet};

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, local date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Pinned clock for deterministic seeding in tests.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The field carrying the document's own number, and its prefix. Other
/// number-like fields (policy numbers, references to foreign documents)
/// are never auto-filled.
fn document_number_field(template_id: &str) -> Option<(&'static str, &'static str)> {
    match template_id {
        "work_order" => Some(("orderNumber", "WO")),
        "invoice" => Some(("invoiceNumber", "INV")),
        "claim_invoice" => Some(("claimNumber", "CLM")),
        "letterhead" => Some(("refNumber", "REF")),
        _ => None,
    }
}

/// Seed a fresh value set for a template: schema defaults, today's date for
/// empty date fields, a clock-derived document number, section toggles on,
/// and an empty row list per section.
pub fn seed_values(template: &Template, clock: &dyn Clock) -> ValueSet {
    let today = clock.today().format("%Y-%m-%d").to_string();
    let number_field = document_number_field(&template.id);

    let mut values = ValueSet::new();
    for field in &template.fields {
        if let Some(default) = &field.default_value {
            values.insert(field.id.clone(), default.clone());
            continue;
        }
        if let Some((id, prefix)) = number_field {
            if field.id == id {
                let number = format!("{}-{}", prefix, clock.today().format("%Y%m%d"));
                values.insert(field.id.clone(), number);
                continue;
            }
        }
        match field.field_type {
            FieldType::Date => values.insert(field.id.clone(), today.clone()),
            FieldType::Boolean => values.insert(field.id.clone(), false),
            _ => {}
        }
    }
    for section in &template.sections {
        values.insert(section.toggle_id.clone(), true);
        values.insert(section.id.clone(), Vec::<RowValues>::new());
    }
    values
}

/// Edit-time date defaulting: normalize a parseable date to `YYYY-MM-DD`,
/// fall back to today for anything unparseable. Strict validation does NOT
/// apply this fallback.
pub fn normalize_date_or_today(raw: &str, clock: &dyn Clock) -> String {
    normalize_date(raw)
        .unwrap_or_else(|| clock.today())
        .format("%Y-%m-%d")
        .to_string()
}
