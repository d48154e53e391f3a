//! FormDoc API Server - Backend for business-document generation
//!
//! Provides REST endpoints for:
//! - Template catalog listing and detail
//! - Validation of raw form input
//! - Preview rendering with computed totals
//! - Draft persistence keyed by template id

use anyhow::Result;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("formdoc_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Initialize application state
    info!("Initializing FormDoc API...");
    let state = AppState::new().await?;
    let state = Arc::new(state);

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Template catalog
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/templates/:id", get(handlers::get_template))
        .route("/api/templates/:id/seed", get(handlers::seed_template))
        // Validation and preview
        .route("/api/templates/:id/validate", post(handlers::validate))
        .route("/api/templates/:id/preview", post(handlers::preview))
        // File resolution
        .route("/api/files/resolve", post(handlers::resolve_file))
        // Draft persistence
        .route(
            "/api/drafts/:template_id",
            put(handlers::save_draft)
                .get(handlers::load_draft)
                .delete(handlers::clear_draft),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Parse bind address
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting FormDoc API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
