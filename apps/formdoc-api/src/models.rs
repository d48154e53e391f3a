//! Request and response models for FormDoc API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared_types::{ComputedTotals, ValueSet};
use template_engine::{OutputFormat, RenderArtifact};

/// Raw form input for validation. Values arrive as the form layer sent
/// them; coercion happens server-side.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub values: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    /// The fully coerced value set (only present when valid).
    pub values: ValueSet,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub values: ValueSet,
    #[serde(default)]
    pub format: OutputFormat,
    /// Run strict validation before rendering instead of the default
    /// lenient live-preview path.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub artifact: RenderArtifact,
    pub totals: ComputedTotals,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub values: ValueSet,
}

/// A raw file selection to resolve into embeddable content.
#[derive(Debug, Deserialize)]
pub struct ResolveFileRequest {
    pub filename: String,
    pub content_base64: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveFileResponse {
    pub data_uri: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub template_id: String,
    pub values: ValueSet,
}
