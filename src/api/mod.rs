//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api`; health and catalog
//! endpoints live at the root.

pub mod dto;
pub mod handlers;
pub mod multipart;
pub mod openapi;

use axum::Router;
use axum::extract::DefaultBodyLimit;

use crate::app_state::AppState;

pub use openapi::ApiDoc;

/// Room for the text fields next to the proof file.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the complete API router with all REST endpoints.
///
/// Request bodies are capped at `max_upload_bytes` plus a small allowance
/// for the form's text fields.
pub fn build_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
        .merge(docs_router())
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
}

#[cfg(feature = "swagger-ui")]
fn docs_router() -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(not(feature = "swagger-ui"))]
fn docs_router() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;
    use utoipa::OpenApi;

    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
