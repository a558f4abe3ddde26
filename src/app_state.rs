//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::{AdminTokenService, IdentityVerifier};
use crate::service::{AdminAuthService, RegistrationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration workflow.
    pub registrations: Arc<RegistrationService>,
    /// Admin username/password login.
    pub admin_auth: Arc<AdminAuthService>,
    /// Verifies admin tokens on `/api/admin` routes.
    pub admin_tokens: Arc<AdminTokenService>,
    /// Verifies identity-provider sessions.
    pub identity: Arc<IdentityVerifier>,
}
