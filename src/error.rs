//! Service error type with HTTP status code mapping.
//!
//! [`AppError`] is the central error type. Each variant maps to an HTTP
//! status code and a numeric code, and renders as `{ "error", "code" }`.
//! Messages are the Indonesian strings shown to registrants and admins.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error response body.
///
/// ```json
/// { "error": "Username atau password salah", "code": 2001 }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Numeric error code (see [`AppError`]).
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category              | HTTP Status             |
/// |-----------|-----------------------|-------------------------|
/// | 1000–1999 | Validation            | 400 / 413               |
/// | 2000–2999 | Authentication        | 401 / 403               |
/// | 3000–3999 | Not Found             | 404                     |
/// | 4000–4999 | Object storage        | 502                     |
/// | 5000–5999 | Server                | 500                     |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request validation failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// Admin login without username or password.
    #[error("Username dan password harus diisi")]
    MissingCredentials,

    /// Unknown admin or wrong password. Deliberately indistinguishable.
    #[error("Username atau password salah")]
    InvalidCredentials,

    /// No usable bearer token on a protected route.
    #[error("sesi tidak valid: {0}")]
    Unauthenticated(String),

    /// Authenticated, but not allowed to perform the action.
    #[error("Akses ditolak")]
    Forbidden,

    /// Registration with the given ID was not found.
    #[error("pendaftaran tidak ditemukan: {0}")]
    RegistrationNotFound(uuid::Uuid),

    /// Uploaded file exceeds the configured size limit.
    #[error("ukuran file melebihi batas {limit} byte")]
    PayloadTooLarge {
        /// Maximum accepted size in bytes.
        limit: usize,
    },

    /// Object storage rejected or failed the proof upload.
    #[error("Gagal mengunggah bukti transfer: {0}")]
    Upload(String),

    /// Relational store failure.
    #[error("Gagal menyimpan data: {0}")]
    PersistenceError(String),

    /// Internal server error. The detail is logged, never returned.
    #[error("Terjadi kesalahan server")]
    Internal(String),
}

impl AppError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::MissingCredentials => 1002,
            Self::PayloadTooLarge { .. } => 1003,
            Self::InvalidCredentials => 2001,
            Self::Unauthenticated(_) => 2002,
            Self::Forbidden => 2003,
            Self::RegistrationNotFound(_) => 3001,
            Self::Upload(_) => 4001,
            Self::Internal(_) => 5000,
            Self::PersistenceError(_) => 5001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::RegistrationNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upload(_) => StatusCode::BAD_GATEWAY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(detail) => tracing::error!(%detail, "internal error"),
            Self::PersistenceError(detail) => tracing::error!(%detail, "persistence error"),
            Self::Upload(detail) => tracing::warn!(%detail, "proof upload failed"),
            _ => {}
        }
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
