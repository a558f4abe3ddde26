//! Signed session tokens for the admin login.
//!
//! Tokens are HS256 JWTs carrying the admin id, username and the fixed
//! role `admin`, valid for 24 hours by default.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AdminAccount;

/// Role claim written into every admin token.
pub const ADMIN_ROLE: &str = "admin";

/// Claims stored in an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin id.
    pub id: Uuid,
    /// Admin username.
    pub username: String,
    /// Always [`ADMIN_ROLE`].
    pub role: String,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Admin token failures.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature valid but past `exp`.
    #[error("token expired")]
    Expired,

    /// Malformed, wrongly signed, or otherwise unusable token.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// Signing failed.
    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Issues and verifies admin tokens with a shared secret.
#[derive(Clone)]
pub struct AdminTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for AdminTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AdminTokenService {
    /// Creates a service signing with `secret`; tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Signs a token for `admin`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Generation`] if signing fails or the expiry
    /// falls outside the representable date range.
    pub fn issue(&self, admin: &AdminAccount) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Generation(format!("ttl {} out of range", self.ttl)))?;
        let claims = AdminClaims {
            id: admin.id,
            username: admin.username.clone(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verifies signature, expiry and role, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] or [`TokenError::Invalid`].
    pub fn verify(&self, token: &str) -> Result<AdminClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<AdminClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;
        if data.claims.role != ADMIN_ROLE {
            return Err(TokenError::Invalid(format!("unexpected role {}", data.claims.role)));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn admin() -> AdminAccount {
        AdminAccount {
            id: Uuid::new_v4(),
            username: "ops".to_string(),
            password_hash: String::new(),
            full_name: Some("Operator".to_string()),
            last_login: None,
        }
    }

    #[test]
    fn issued_token_verifies_with_claims() {
        let service = AdminTokenService::new("test-secret", Duration::hours(24));
        let account = admin();
        let Ok(token) = service.issue(&account) else {
            panic!("issue failed");
        };
        let Ok(claims) = service.verify(&token) else {
            panic!("verify failed");
        };
        assert_eq!(claims.id, account.id);
        assert_eq!(claims.username, "ops");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let issuer = AdminTokenService::new("secret-a", Duration::hours(1));
        let verifier = AdminTokenService::new("secret-b", Duration::hours(1));
        let Ok(token) = issuer.issue(&admin()) else {
            panic!("issue failed");
        };
        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = AdminTokenService::new("s", Duration::seconds(-10));
        let Ok(token) = service.issue(&admin()) else {
            panic!("issue failed");
        };
        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn unrepresentable_expiry_fails_instead_of_panicking() {
        let service = AdminTokenService::new("s", Duration::MAX);
        assert!(matches!(service.issue(&admin()), Err(TokenError::Generation(_))));
    }

    #[test]
    fn garbage_is_invalid() {
        let service = AdminTokenService::new("s", Duration::hours(1));
        assert!(matches!(service.verify("not.a.jwt"), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let service = AdminTokenService::new("super-secret", Duration::hours(1));
        assert!(!format!("{service:?}").contains("super-secret"));
    }
}
