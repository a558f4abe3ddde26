//! ZIN gathering registration handlers for signed-in users.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::api::dto::{
    RegistrationCreatedResponse, RegistrationDto, RegistrationForm, RegistrationListResponse,
    StatsResponse, StatusQuery, UpdateStatusRequest,
};
use crate::api::handlers::requested_status;
use crate::api::multipart::FormData;
use crate::app_state::AppState;
use crate::domain::{NewRegistration, RegistrationId, SessionUser};
use crate::error::{AppError, ErrorResponse};

/// `POST /api/registrations` — Submit a registration with optional proof.
///
/// # Errors
///
/// Returns [`AppError`] on validation, upload or store failure.
#[utoipa::path(
    post,
    path = "/api/registrations",
    tag = "Registrations",
    summary = "Submit a registration",
    description = "Uploads the transfer proof (if any) and stores a pending registration owned by the caller.",
    request_body(content = RegistrationForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Registration stored", body = RegistrationCreatedResponse),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 413, description = "Proof too large", body = ErrorResponse),
        (status = 502, description = "Proof upload failed", body = ErrorResponse),
    ),
    security(("identity" = []))
)]
pub async fn submit_registration(
    State(state): State<AppState>,
    user: SessionUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let service = &state.registrations;
    let mut form = FormData::read(multipart, service.max_upload_bytes()).await?;
    let new = NewRegistration {
        display_name: form.text("display_name"),
        city: form.text("city"),
        phone: form.text("phone"),
        vip_tickets: form.count("vip_tickets")?,
        regular_tickets: form.count("regular_tickets")?,
    };
    let minimum_down_payment = new.minimum_down_payment(service.pricing());

    let registration = service
        .submit_registration(&user, new, form.take_proof())
        .await?;

    let response = RegistrationCreatedResponse {
        registration: RegistrationDto::from_registration(registration, service.pricing()),
        minimum_down_payment,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/registrations` — The caller's dashboard list.
///
/// # Errors
///
/// Returns [`AppError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/registrations",
    tag = "Registrations",
    summary = "List registrations",
    description = "Admins (by name or email) see every registration, other users only their own. Newest first.",
    params(StatusQuery),
    responses(
        (status = 200, description = "Registration list", body = RegistrationListResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    ),
    security(("identity" = []))
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    user: SessionUser,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = &state.registrations;
    let filter = query.status.unwrap_or_default();
    let rows = service.registrations_for(&user, filter).await?;

    let registrations: Vec<RegistrationDto> = rows
        .into_iter()
        .map(|r| RegistrationDto::from_registration(r, service.pricing()))
        .collect();
    Ok(Json(RegistrationListResponse {
        total: registrations.len(),
        registrations,
        is_admin: user.is_admin(),
    }))
}

/// `GET /api/registrations/stats` — Dashboard statistics for the caller.
///
/// # Errors
///
/// Returns [`AppError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/registrations/stats",
    tag = "Registrations",
    summary = "Dashboard statistics",
    description = "Ticket totals, status counts and revenue over the registrations visible to the caller. Revenue includes unpaid rows.",
    responses(
        (status = 200, description = "Statistics", body = StatsResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    ),
    security(("identity" = []))
)]
pub async fn registration_stats(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.registrations.stats_for(&user).await?;
    Ok(Json(StatsResponse {
        stats,
        is_admin: user.is_admin(),
    }))
}

/// `PATCH /api/registrations/{id}/status` — Mark paid or pending.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] unless the caller passes the admin
/// name/email check, [`AppError::RegistrationNotFound`] for unknown ids.
#[utoipa::path(
    patch,
    path = "/api/registrations/{id}/status",
    tag = "Registrations",
    summary = "Update payment status",
    description = "Overwrites the payment status. Setting the current value again succeeds.",
    params(("id" = uuid::Uuid, Path, description = "Registration ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated registration", body = RegistrationDto),
        (status = 400, description = "Malformed id or body, or unknown status", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
    ),
    security(("identity" = []))
)]
pub async fn update_registration_status(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, registration_id = %id, "status change refused");
        return Err(AppError::Forbidden);
    }
    let id: RegistrationId = id.parse()?;
    let status = requested_status(payload)?;
    let service = &state.registrations;
    let updated = service.update_payment_status(id, status).await?;
    Ok(Json(RegistrationDto::from_registration(
        updated,
        service.pricing(),
    )))
}

/// Registration routes for signed-in users.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registrations",
            get(list_registrations).post(submit_registration),
        )
        .route("/registrations/stats", get(registration_stats))
        .route(
            "/registrations/{id}/status",
            patch(update_registration_status),
        )
}
