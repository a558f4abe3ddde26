//! System endpoints: health check, event catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// An event on the public listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventInfo {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    date: Option<&'static str>,
    location: Option<&'static str>,
    price_label: &'static str,
    /// Whether registration goes through this service.
    registration_open: bool,
}

const EVENTS: &[EventInfo] = &[
    EventInfo {
        id: "zin-gathering",
        name: "ZIN Gathering",
        kind: "Zumba",
        date: None,
        location: None,
        price_label: "Rp 200.000 - Rp 350.000",
        registration_open: true,
    },
    EventInfo {
        id: "pdzumbabandung",
        name: "Power Duo Zumba Bandung",
        kind: "Zumba",
        date: Some("15 Maret 2026"),
        location: Some("GOR Saparua, Bandung"),
        price_label: "Rp 185.000 - Rp 1.200.000",
        registration_open: false,
    },
    EventInfo {
        id: "pdzumbabali",
        name: "Power Duo Zumba Bali",
        kind: "Zumba",
        date: Some("22 Maret 2026"),
        location: Some("Bali Nusa Dua Convention Center"),
        price_label: "Rp 185.000 - Rp 1.200.000",
        registration_open: true,
    },
    EventInfo {
        id: "fun-run-tsm",
        name: "Fun Run TSM",
        kind: "Running",
        date: Some("5 April 2026"),
        location: Some("Trans Studio Mall Bandung"),
        price_label: "Rp 150.000",
        registration_open: false,
    },
    EventInfo {
        id: "padel-fun-dago",
        name: "Padel Fun Dago",
        kind: "Padel",
        date: Some("12 April 2026"),
        location: Some("Dago Sport Center"),
        price_label: "Rp 200.000",
        registration_open: false,
    },
    EventInfo {
        id: "pound-fit-bec",
        name: "Pound Fit BEC",
        kind: "Fitness",
        date: Some("20 April 2026"),
        location: Some("Bandung Exhibition Center"),
        price_label: "Rp 250.000",
        registration_open: false,
    },
    EventInfo {
        id: "softex-tennis",
        name: "Softex Tennis",
        kind: "Tennis",
        date: Some("28 April 2026"),
        location: Some("Lapangan Tennis Dago"),
        price_label: "Rp 300.000",
        registration_open: false,
    },
];

/// `GET /config/events` — Event catalog.
#[utoipa::path(
    get,
    path = "/config/events",
    tag = "System",
    summary = "List events",
    description = "Returns the hard-coded event catalog. Only events with `registration_open` accept registrations here.",
    responses(
        (status = 200, description = "Event catalog", body = Vec<EventInfo>),
    )
)]
pub async fn events_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(EVENTS))
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/events", get(events_handler))
}
