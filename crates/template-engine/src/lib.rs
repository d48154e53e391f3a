//! Document template catalog and preview rendering
//!
//! This crate provides the template catalog (the set of supported document
//! kinds with their field schemas), default-value seeding behind an injected
//! clock, and the preview renderer that turns a value set plus its computed
//! totals into an HTML or plain-text document.

pub mod catalog;
pub mod clock;
pub mod render;

pub use catalog::{get_template, list_templates, templates, TemplateError};
pub use clock::{normalize_date_or_today, seed_values, Clock, FixedClock, SystemClock};
pub use render::{render_document, OutputFormat, RenderArtifact, RenderRequest, RenderResponse};
