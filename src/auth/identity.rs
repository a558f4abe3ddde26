//! Verification of identity-provider access tokens.
//!
//! The identity provider signs access tokens with a shared HS256 secret
//! and the audience `authenticated`. Only `sub`, `email` and
//! `user_metadata.full_name` are read.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use uuid::Uuid;

use super::admin_token::TokenError;
use crate::domain::SessionUser;

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    sub: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

/// Decodes end-user sessions issued by the identity provider.
#[derive(Clone)]
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

impl IdentityVerifier {
    /// Creates a verifier for tokens signed with `secret` for `audience`.
    #[must_use]
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` and returns the user it describes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] or [`TokenError::Invalid`].
    pub fn verify(&self, token: &str) -> Result<SessionUser, TokenError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;
        let claims = data.claims;
        Ok(SessionUser {
            id: claims.sub,
            email: claims.email,
            full_name: claims.user_metadata.and_then(|m| m.full_name),
        })
    }
}
