//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod registration;
pub mod system;
pub mod zumba;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router};

use crate::api::dto::UpdateStatusRequest;
use crate::app_state::AppState;
use crate::domain::PaymentStatus;
use crate::error::AppError;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(registration::routes())
        .merge(zumba::routes())
        .merge(admin::routes())
}

/// Reads the status PATCH body into a [`PaymentStatus`].
///
/// Unreadable JSON is reported through [`AppError`] so the client gets the
/// usual `{error, code}` body instead of axum's plain-text rejection.
pub(crate) fn requested_status(
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<PaymentStatus, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "unreadable status body");
        AppError::InvalidRequest("payment_status harus diisi".to_string())
    })?;
    req.payment_status.parse()
}
