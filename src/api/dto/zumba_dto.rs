//! DTOs for the Power Duo Zumba event.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{PaymentStatus, ZumbaRegistration, ZumbaTier};

/// A ticket tier with its price and perks.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ZumbaTierDto {
    /// Form value (`platinum`, `gold`, `blue`, `green`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Unit price in rupiah.
    pub price: u64,
    /// Perks included in the tier.
    pub features: Vec<&'static str>,
}

impl From<ZumbaTier> for ZumbaTierDto {
    fn from(tier: ZumbaTier) -> Self {
        Self {
            id: tier.id(),
            name: tier.display_name(),
            price: tier.price(),
            features: tier.features().to_vec(),
        }
    }
}

/// A zumba registration as shown on the dashboards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ZumbaRegistrationDto {
    /// Registration ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Event name.
    pub event_name: String,
    /// Tier display name.
    pub ticket_category: String,
    /// Unit price in rupiah.
    pub ticket_price: u64,
    /// Registrant name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// Number of tickets.
    pub ticket_count: u32,
    /// `ticket_price × ticket_count`.
    pub total_cost: u64,
    /// Public URL of the transfer proof.
    pub proof_url: String,
    /// `pending` or `paid`.
    pub payment_status: PaymentStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<ZumbaRegistration> for ZumbaRegistrationDto {
    fn from(r: ZumbaRegistration) -> Self {
        Self {
            id: r.id.uuid(),
            user_id: r.user_id,
            event_name: r.event_name,
            ticket_category: r.tier.display_name().to_string(),
            ticket_price: r.ticket_price,
            display_name: r.display_name,
            city: r.city,
            phone: r.phone,
            ticket_count: r.ticket_count,
            total_cost: r.total_cost,
            proof_url: r.proof_url,
            payment_status: r.payment_status,
            created_at: r.created_at,
        }
    }
}

/// Response to the zumba list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ZumbaRegistrationListResponse {
    /// Registrations, newest first.
    pub registrations: Vec<ZumbaRegistrationDto>,
    /// Number of entries in `registrations`.
    pub total: usize,
}

/// Multipart fields of `POST /api/events/zumba/registrations`.
#[derive(Debug, ToSchema)]
pub struct ZumbaRegistrationForm {
    /// Tier id or display name.
    pub tier: String,
    /// Registrant name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// Number of tickets, at least 1.
    pub ticket_count: String,
    /// Transfer proof image. Required.
    #[schema(value_type = String, format = Binary)]
    pub proof: Vec<u8>,
}
