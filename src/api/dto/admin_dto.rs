//! DTOs for the admin login.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AdminProfile;

/// Body of `POST /api/admin/login`. Absent fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    /// Admin username.
    #[serde(default)]
    pub username: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    /// Bearer token for `/api/admin` routes, valid for 24 hours.
    pub token: String,
    /// The authenticated admin.
    pub admin: AdminProfile,
}

/// Body of `GET /api/admin/login`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminLoginReadyResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status.
    #[schema(example = "Admin Login API is ready")]
    pub message: &'static str,
    /// Path of the login endpoint.
    pub endpoint: &'static str,
    /// Method to log in with.
    pub method: &'static str,
}

impl AdminLoginReadyResponse {
    /// The fixed readiness body.
    #[must_use]
    pub const fn ready() -> Self {
        Self {
            success: true,
            message: "Admin Login API is ready",
            endpoint: "/api/admin/login",
            method: "POST",
        }
    }
}
