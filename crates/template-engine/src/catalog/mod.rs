//! Template catalog
//!
//! Named collections of field schemas plus repeated-section declarations:
//! the set of supported document kinds. Lookup only; an unknown id is a
//! normal outcome for the caller to present, never a panic.

mod claim_invoice;
mod invoice;
mod letterhead;
mod work_order;

use once_cell::sync::Lazy;
use thiserror::Error;

use shared_types::{SelectOption, Template, TemplateInfo};

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    UnknownTemplate(String),
}

static CATALOG: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        work_order::template(),
        letterhead::template(),
        invoice::template(),
        claim_invoice::template(),
    ]
});

/// All templates, in catalog order.
pub fn templates() -> &'static [Template] {
    &CATALOG
}

/// Catalog summaries for the list endpoint.
pub fn list_templates() -> Vec<TemplateInfo> {
    CATALOG.iter().map(Template::info).collect()
}

/// Look up one template by id.
pub fn get_template(id: &str) -> Result<&'static Template, TemplateError> {
    CATALOG
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))
}

/// Currency options shared by the monetary templates.
pub(crate) fn currency_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("$", "US Dollar ($)"),
        SelectOption::new("€", "Euro (€)"),
        SelectOption::new("£", "Pound Sterling (£)"),
        SelectOption::new("¥", "Yen (¥)"),
        SelectOption::new("A$", "Australian Dollar (A$)"),
        SelectOption::new("C$", "Canadian Dollar (C$)"),
        SelectOption::new("₹", "Indian Rupee (₹)"),
    ]
}
