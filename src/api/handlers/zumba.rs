//! Power Duo Zumba handlers: tier catalog, submission, own registrations.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    StatusQuery, ZumbaRegistrationDto, ZumbaRegistrationForm, ZumbaRegistrationListResponse,
    ZumbaTierDto,
};
use crate::api::multipart::FormData;
use crate::app_state::AppState;
use crate::domain::{NewZumbaRegistration, SessionUser, ZumbaRegistration, ZumbaTier};
use crate::error::{AppError, ErrorResponse};

/// `GET /api/events/zumba/tiers` — Ticket tiers with prices.
#[utoipa::path(
    get,
    path = "/api/events/zumba/tiers",
    tag = "Zumba",
    summary = "List ticket tiers",
    responses(
        (status = 200, description = "Tier catalog", body = Vec<ZumbaTierDto>),
    )
)]
pub async fn list_tiers() -> impl IntoResponse {
    let tiers: Vec<ZumbaTierDto> = ZumbaTier::ALL.into_iter().map(ZumbaTierDto::from).collect();
    Json(tiers)
}

/// `POST /api/events/zumba/registrations` — Register with a required proof.
///
/// # Errors
///
/// Returns [`AppError`] on validation, upload or store failure.
#[utoipa::path(
    post,
    path = "/api/events/zumba/registrations",
    tag = "Zumba",
    summary = "Submit a zumba registration",
    description = "Uploads the transfer proof and stores a pending registration for the selected tier.",
    request_body(content = ZumbaRegistrationForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Registration stored", body = ZumbaRegistrationDto),
        (status = 400, description = "Incomplete form or unknown tier", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 413, description = "Proof too large", body = ErrorResponse),
        (status = 502, description = "Proof upload failed", body = ErrorResponse),
    ),
    security(("identity" = []))
)]
pub async fn submit_zumba_registration(
    State(state): State<AppState>,
    user: SessionUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let service = &state.registrations;
    let mut form = FormData::read(multipart, service.max_upload_bytes()).await?;
    let tier = parse_tier(&form.text("tier"))?;
    let new = NewZumbaRegistration {
        tier,
        display_name: form.text("display_name"),
        city: form.text("city"),
        phone: form.text("phone"),
        ticket_count: form.count("ticket_count")?,
    };

    let registration = service
        .submit_zumba_registration(&user, new, form.take_proof())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ZumbaRegistrationDto::from(registration)),
    ))
}

/// `GET /api/events/zumba/registrations` — The caller's zumba registrations.
///
/// # Errors
///
/// Returns [`AppError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/events/zumba/registrations",
    tag = "Zumba",
    summary = "List own zumba registrations",
    params(StatusQuery),
    responses(
        (status = 200, description = "Registration list", body = ZumbaRegistrationListResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    ),
    security(("identity" = []))
)]
pub async fn list_own_zumba_registrations(
    State(state): State<AppState>,
    user: SessionUser,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .registrations
        .zumba_registrations(Some(&user), query.status.unwrap_or_default())
        .await?;
    Ok(Json(zumba_list(rows)))
}

/// Accepts a tier id (`gold`) or its display name (`Gold VIP`).
fn parse_tier(raw: &str) -> Result<ZumbaTier, AppError> {
    if raw.is_empty() {
        return Err(AppError::InvalidRequest(
            "Mohon lengkapi semua data!".to_string(),
        ));
    }
    raw.to_ascii_lowercase()
        .parse()
        .or_else(|e| ZumbaTier::from_display_name(raw).ok_or(e))
}

pub(crate) fn zumba_list(rows: Vec<ZumbaRegistration>) -> ZumbaRegistrationListResponse {
    let registrations: Vec<ZumbaRegistrationDto> =
        rows.into_iter().map(ZumbaRegistrationDto::from).collect();
    ZumbaRegistrationListResponse {
        total: registrations.len(),
        registrations,
    }
}

/// Zumba event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/zumba/tiers", get(list_tiers))
        .route(
            "/events/zumba/registrations",
            get(list_own_zumba_registrations).post(submit_zumba_registration),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_accepts_id_or_display_name() {
        assert!(matches!(parse_tier("gold"), Ok(ZumbaTier::Gold)));
        assert!(matches!(parse_tier("PLATINUM"), Ok(ZumbaTier::Platinum)));
        assert!(matches!(parse_tier("Blue Cat BEC"), Ok(ZumbaTier::Blue)));
        assert!(matches!(parse_tier(""), Err(AppError::InvalidRequest(_))));
        assert!(matches!(parse_tier("bronze"), Err(AppError::InvalidRequest(_))));
    }
}
