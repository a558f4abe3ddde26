//! DTOs for ZIN gathering registrations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DashboardStats, PaymentStatus, Registration, TicketPricing};

/// A registration as shown on the dashboards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationDto {
    /// Registration ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// ZIN name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// VIP tickets booked.
    pub vip_tickets: u32,
    /// Regular tickets booked.
    pub regular_tickets: u32,
    /// VIP plus regular.
    pub total_tickets: u64,
    /// Amount owed in rupiah.
    pub total_payable: u64,
    /// Public URL of the transfer proof.
    pub proof_url: Option<String>,
    /// `pending` or `paid`.
    pub payment_status: PaymentStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl RegistrationDto {
    /// Converts a registration, pricing it with `pricing`.
    #[must_use]
    pub fn from_registration(registration: Registration, pricing: &TicketPricing) -> Self {
        Self {
            id: registration.id.uuid(),
            user_id: registration.user_id,
            total_tickets: registration.total_tickets(),
            total_payable: registration.total_payable(pricing),
            display_name: registration.display_name,
            city: registration.city,
            phone: registration.phone,
            vip_tickets: registration.vip_tickets,
            regular_tickets: registration.regular_tickets,
            proof_url: registration.proof_url,
            payment_status: registration.payment_status,
            created_at: registration.created_at,
        }
    }
}

/// Response to `POST /api/registrations`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationCreatedResponse {
    /// The stored registration, always `pending`.
    pub registration: RegistrationDto,
    /// Down payment quoted for the booking.
    pub minimum_down_payment: u64,
}

/// Response to the registration list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationListResponse {
    /// Registrations, newest first.
    pub registrations: Vec<RegistrationDto>,
    /// Number of entries in `registrations`.
    pub total: usize,
    /// Whether the caller gets the administrative view.
    pub is_admin: bool,
}

/// Response to the statistics endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Aggregate figures.
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Whether the caller gets the administrative view.
    pub is_admin: bool,
}

/// Multipart fields of `POST /api/registrations`.
#[derive(Debug, ToSchema)]
pub struct RegistrationForm {
    /// ZIN name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// VIP tickets; empty means 0.
    pub vip_tickets: Option<String>,
    /// Regular tickets; empty means 0.
    pub regular_tickets: Option<String>,
    /// Transfer proof image.
    #[schema(value_type = Option<String>, format = Binary)]
    pub proof: Option<Vec<u8>>,
}
