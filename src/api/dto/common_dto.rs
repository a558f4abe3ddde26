//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::StatusFilter;

/// `?status=` query for dashboard lists.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// `all`, `pending` or `paid`. The default depends on the endpoint.
    #[serde(default)]
    pub status: Option<StatusFilter>,
}

/// Body of the status update endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status, `pending` or `paid`.
    #[schema(example = "paid")]
    pub payment_status: String,
}
