//! HTTP handlers for FormDoc API

use axum::{
    extract::{Path, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::Arc;

use draft_store::DraftStore;
use shared_types::{Template, TemplateInfo, ValueSet};
use template_engine::{
    render_document, seed_values, RenderRequest, SystemClock,
};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List the template catalog
pub async fn list_templates() -> Json<Vec<TemplateInfo>> {
    Json(template_engine::list_templates())
}

/// Get one template's full field and section description
pub async fn get_template(Path(id): Path<String>) -> Result<Json<Template>, ApiError> {
    let template = template_engine::get_template(&id)?;
    Ok(Json(template.clone()))
}

/// Seed a fresh value set for a template (defaults, dates, document number)
pub async fn seed_template(Path(id): Path<String>) -> Result<Json<ValueSet>, ApiError> {
    let template = template_engine::get_template(&id)?;
    Ok(Json(seed_values(template, &SystemClock)))
}

/// Validate raw form input against a template
pub async fn validate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let template = template_engine::get_template(&id)?;
    match state.engine.validate(template, &req.values) {
        Ok(values) => Ok(Json(ValidateResponse {
            valid: true,
            values,
        })),
        Err(errors) => Err(ApiError::Validation(errors)),
    }
}

/// Render a preview with computed totals
///
/// The default path is lenient: whatever value set the client holds renders,
/// with malformed numerics counted as zero. `strict: true` validates first
/// and returns the field error map instead of a document.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let template = template_engine::get_template(&id)?;

    let values = if req.strict {
        let raw = serde_json::to_value(&req.values)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let raw = raw
            .as_object()
            .ok_or_else(|| ApiError::InvalidRequest("values must be an object".to_string()))?
            .clone();
        state
            .engine
            .validate(template, &raw)
            .map_err(ApiError::Validation)?
    } else {
        req.values
    };

    let totals = state.engine.compute(template, &values);
    let rendered = render_document(
        &RenderRequest {
            template_id: id,
            values,
            format: req.format,
        },
        &totals,
    )?;

    Ok(Json(PreviewResponse {
        artifact: rendered.artifact,
        totals,
        warnings: rendered.warnings,
    }))
}

/// Resolve a raw file selection into an embeddable data URI
///
/// Rejections (unsupported type, over the size ceiling) come back as 400s;
/// the client resets the field to empty rather than leaving it partially
/// populated.
pub async fn resolve_file(
    Json(req): Json<ResolveFileRequest>,
) -> Result<Json<ResolveFileResponse>, ApiError> {
    let bytes = BASE64
        .decode(&req.content_base64)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid file base64: {}", e)))?;
    let data_uri = formdoc_core::resolve_file(&req.filename, &bytes)?;
    Ok(Json(ResolveFileResponse { data_uri }))
}

/// Save the draft for a template (overwrites any previous draft)
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
    Json(req): Json<SaveDraftRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    // Unknown template ids don't get drafts.
    template_engine::get_template(&template_id)?;

    state.store.save(&template_id, &req.values).await?;
    tracing::info!("Saved draft for template: {}", template_id);

    Ok(Json(DraftResponse {
        template_id,
        values: req.values,
    }))
}

/// Load the draft for a template
pub async fn load_draft(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
) -> Result<Json<DraftResponse>, ApiError> {
    template_engine::get_template(&template_id)?;

    let values = state
        .store
        .load(&template_id)
        .await?
        .ok_or_else(|| ApiError::DraftNotFound(template_id.clone()))?;

    Ok(Json(DraftResponse {
        template_id,
        values,
    }))
}

/// Discard the draft for a template
pub async fn clear_draft(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    template_engine::get_template(&template_id)?;
    state.store.clear(&template_id).await?;
    Ok(Json(serde_json::json!({ "cleared": template_id })))
}
