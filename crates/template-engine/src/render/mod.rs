//! Preview rendering
//!
//! Turns a template, a value set, and the matching computed totals into a
//! human-viewable document. Rendering is a pure consumer: row inclusion
//! follows the same skip rule as the computation engine, and totals are
//! received, never recomputed here.

mod html;
mod text;

use serde::{Deserialize, Serialize};

use shared_types::{ComputedTotals, ValueSet};

use crate::catalog::{get_template, TemplateError};

/// Output format for rendered documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

impl OutputFormat {
    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html; charset=utf-8",
            OutputFormat::Text => "text/plain; charset=utf-8",
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// A render request: which template, which values, which format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub template_id: String,
    pub values: ValueSet,
    #[serde(default)]
    pub format: OutputFormat,
}

/// The rendered document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderArtifact {
    pub content: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    pub artifact: RenderArtifact,
    /// Non-fatal issues, e.g. a file field that was never resolved.
    pub warnings: Vec<String>,
}

/// Render a document from a finalized value set and its computed totals.
pub fn render_document(
    request: &RenderRequest,
    totals: &ComputedTotals,
) -> Result<RenderResponse, TemplateError> {
    let template = get_template(&request.template_id)?;
    let (content, warnings) = match request.format {
        OutputFormat::Html => html::render(template, &request.values, totals),
        OutputFormat::Text => text::render(template, &request.values, totals),
    };
    Ok(RenderResponse {
        artifact: RenderArtifact {
            content,
            mime_type: request.format.mime_type().to_string(),
        },
        warnings,
    })
}

/// Currency symbol for display, defaulting to dollars.
pub(crate) fn currency_symbol(values: &ValueSet) -> &str {
    values
        .get_str(formdoc_core::CURRENCY_FIELD)
        .filter(|s| !s.is_empty())
        .unwrap_or("$")
}

/// Shared row-inclusion rule: mirrors the computation engine's skip policy.
pub(crate) fn row_included(row: &shared_types::RowValues, key_field: &str) -> bool {
    match row.get(key_field) {
        None => false,
        Some(shared_types::FieldValue::Text(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Display form of a scalar value; rows have no scalar display.
pub(crate) fn scalar_display(value: Option<&shared_types::FieldValue>) -> Option<String> {
    match value {
        Some(shared_types::FieldValue::Text(s)) => Some(s.clone()),
        Some(shared_types::FieldValue::Number(n)) => Some(n.to_string()),
        Some(shared_types::FieldValue::Bool(b)) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Some(shared_types::FieldValue::Rows(_)) | None => None,
    }
}
