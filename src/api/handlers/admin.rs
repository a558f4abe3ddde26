//! Admin handlers: login and the token-protected dashboard.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::api::dto::{
    AdminLoginReadyResponse, AdminLoginRequest, AdminLoginResponse, RegistrationDto,
    RegistrationListResponse, StatsResponse, StatusQuery, UpdateStatusRequest,
    ZumbaRegistrationDto, ZumbaRegistrationListResponse,
};
use crate::api::handlers::requested_status;
use crate::api::handlers::zumba::zumba_list;
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::{RegistrationId, StatusFilter};
use crate::error::{AppError, ErrorResponse};

/// `POST /api/admin/login` — Exchange username and password for a token.
///
/// # Errors
///
/// Returns [`AppError::MissingCredentials`], [`AppError::InvalidCredentials`]
/// or [`AppError::Internal`].
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin",
    summary = "Admin login",
    description = "Checks the credentials against the admins table and returns a token valid for 24 hours. Unknown usernames and wrong passwords produce the same response.",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AdminLoginResponse),
        (status = 400, description = "Username or password missing", body = ErrorResponse),
        (status = 401, description = "Wrong username or password", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "unreadable login body");
        AppError::MissingCredentials
    })?;
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let login = state.admin_auth.login(&username, &password).await?;
    Ok(Json(AdminLoginResponse {
        token: login.token,
        admin: login.admin,
    }))
}

/// `GET /api/admin/login` — Readiness probe for the login endpoint.
#[utoipa::path(
    get,
    path = "/api/admin/login",
    tag = "Admin",
    summary = "Login endpoint readiness",
    responses(
        (status = 200, description = "Endpoint is up", body = AdminLoginReadyResponse),
    )
)]
pub async fn login_ready() -> impl IntoResponse {
    Json(AdminLoginReadyResponse::ready())
}

/// `GET /api/admin/registrations` — Every registration, pending by default.
///
/// # Errors
///
/// Returns [`AppError`] on an invalid token or store failure.
#[utoipa::path(
    get,
    path = "/api/admin/registrations",
    tag = "Admin",
    summary = "List all registrations",
    description = "Admin dashboard list. Without `status` only pending registrations are returned.",
    params(StatusQuery),
    responses(
        (status = 200, description = "Registration list", body = RegistrationListResponse),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
    ),
    security(("admin" = []))
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = &state.registrations;
    let filter = query.status.unwrap_or(StatusFilter::Pending);
    let rows = service.all_registrations(filter).await?;

    let registrations: Vec<RegistrationDto> = rows
        .into_iter()
        .map(|r| RegistrationDto::from_registration(r, service.pricing()))
        .collect();
    Ok(Json(RegistrationListResponse {
        total: registrations.len(),
        registrations,
        is_admin: true,
    }))
}

/// `GET /api/admin/stats` — Statistics with revenue over paid rows only.
///
/// # Errors
///
/// Returns [`AppError`] on an invalid token or store failure.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    summary = "Admin statistics",
    responses(
        (status = 200, description = "Statistics", body = StatsResponse),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
    ),
    security(("admin" = []))
)]
pub async fn stats(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.registrations.admin_stats().await?;
    Ok(Json(StatsResponse {
        stats,
        is_admin: true,
    }))
}

/// `PATCH /api/admin/registrations/{id}/status` — Mark paid or pending.
///
/// # Errors
///
/// Returns [`AppError`] on an invalid token, unknown status or unknown id.
#[utoipa::path(
    patch,
    path = "/api/admin/registrations/{id}/status",
    tag = "Admin",
    summary = "Update payment status",
    params(("id" = uuid::Uuid, Path, description = "Registration ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated registration", body = RegistrationDto),
        (status = 400, description = "Malformed id or body, or unknown status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
    ),
    security(("admin" = []))
)]
pub async fn update_registration_status(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id: RegistrationId = id.parse()?;
    let status = requested_status(payload)?;
    let service = &state.registrations;
    let updated = service.update_payment_status(id, status).await?;
    tracing::info!(admin = %admin.username, registration_id = %id, %status, "status set by admin");
    Ok(Json(RegistrationDto::from_registration(
        updated,
        service.pricing(),
    )))
}

/// `GET /api/admin/zumba-registrations` — Every zumba registration.
///
/// # Errors
///
/// Returns [`AppError`] on an invalid token or store failure.
#[utoipa::path(
    get,
    path = "/api/admin/zumba-registrations",
    tag = "Admin",
    summary = "List all zumba registrations",
    params(StatusQuery),
    responses(
        (status = 200, description = "Registration list", body = ZumbaRegistrationListResponse),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
    ),
    security(("admin" = []))
)]
pub async fn list_zumba_registrations(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .registrations
        .zumba_registrations(None, query.status.unwrap_or_default())
        .await?;
    Ok(Json(zumba_list(rows)))
}

/// `PATCH /api/admin/zumba-registrations/{id}/status` — Mark paid or pending.
///
/// # Errors
///
/// Returns [`AppError`] on an invalid token, unknown status or unknown id.
#[utoipa::path(
    patch,
    path = "/api/admin/zumba-registrations/{id}/status",
    tag = "Admin",
    summary = "Update zumba payment status",
    params(("id" = uuid::Uuid, Path, description = "Registration ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated registration", body = ZumbaRegistrationDto),
        (status = 400, description = "Malformed id or body, or unknown status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
    ),
    security(("admin" = []))
)]
pub async fn update_zumba_registration_status(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id: RegistrationId = id.parse()?;
    let status = requested_status(payload)?;
    let updated = state
        .registrations
        .update_zumba_payment_status(id, status)
        .await?;
    tracing::info!(admin = %admin.username, registration_id = %id, %status, "zumba status set by admin");
    Ok(Json(ZumbaRegistrationDto::from(updated)))
}

/// Admin routes under `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_ready).post(login))
        .route("/admin/registrations", get(list_registrations))
        .route(
            "/admin/registrations/{id}/status",
            patch(update_registration_status),
        )
        .route("/admin/stats", get(stats))
        .route("/admin/zumba-registrations", get(list_zumba_registrations))
        .route(
            "/admin/zumba-registrations/{id}/status",
            patch(update_zumba_registration_status),
        )
}
