//! Axum extractors for the two bearer-token sessions.
//!
//! [`SessionUser`] comes from the identity provider's token and gates
//! the participant dashboard. [`AdminSession`] comes from the admin
//! login and gates the `/api/admin` routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::admin_token::{AdminClaims, TokenError};
use crate::app_state::AppState;
use crate::domain::SessionUser;
use crate::error::AppError;

/// An authenticated admin, decoded from a token issued by the admin login.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AdminClaims);

/// Returns the token of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("header Authorization tidak ada".to_string()))?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("format header Authorization salah".to_string()))
}

fn token_rejection(err: &TokenError) -> AppError {
    match err {
        TokenError::Expired => AppError::Unauthenticated("token kedaluwarsa".to_string()),
        TokenError::Invalid(_) | TokenError::Generation(_) => {
            AppError::Unauthenticated("token tidak valid".to_string())
        }
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts)?;
        match state.identity.verify(token) {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session user authenticated");
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, uri = ?parts.uri, "identity token rejected");
                Err(token_rejection(&e))
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        match state.admin_tokens.verify(token) {
            Ok(claims) => {
                tracing::debug!(admin_id = %claims.id, username = %claims.username, "admin authenticated");
                Ok(Self(claims))
            }
            Err(e) => {
                tracing::warn!(error = %e, uri = ?parts.uri, "admin token rejected");
                Err(token_rejection(&e))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/admin/stats");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let Ok(request) = builder.body(()) else {
            panic!("request build failed");
        };
        request.into_parts().0
    }

    #[test]
    fn extracts_bearer_token() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert!(matches!(bearer_token(&parts), Ok("abc.def.ghi")));
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let parts = parts_with(None);
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn other_schemes_are_rejected() {
        let parts = parts_with(Some("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&parts).is_err());
        let parts = parts_with(Some("Bearer "));
        assert!(bearer_token(&parts).is_err());
    }
}
