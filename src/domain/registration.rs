//! Registration records for both event tables.
//!
//! A registration is created once by its owner and afterwards only its
//! `payment_status` changes. Construction goes through
//! [`NewRegistration::into_registration`] and
//! [`NewZumbaRegistration::into_registration`], which always start the
//! record as [`PaymentStatus::Pending`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::pricing::{TicketPricing, minimum_down_payment};
use super::zumba::{ZUMBA_EVENT_NAME, ZumbaTier};
use super::{PaymentStatus, RegistrationId};
use crate::error::AppError;

/// Largest ticket count a single form may request.
///
/// Counts are stored in `INTEGER` columns, so anything above `i32::MAX`
/// could never be inserted.
pub const MAX_TICKET_COUNT: u32 = i32::MAX.unsigned_abs();

/// A row of `event_registrations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Row identifier.
    pub id: RegistrationId,
    /// Owning identity-provider user.
    pub user_id: Uuid,
    /// Name the registrant goes by (ZIN name).
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// Active WhatsApp number.
    pub phone: String,
    /// Number of VIP tickets booked.
    pub vip_tickets: u32,
    /// Number of regular tickets booked.
    pub regular_tickets: u32,
    /// Public URL of the transfer proof, if one was uploaded.
    pub proof_url: Option<String>,
    /// Verification state.
    pub payment_status: PaymentStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Amount owed for the booked tickets.
    #[must_use]
    pub const fn total_payable(&self, pricing: &TicketPricing) -> u64 {
        pricing.total_payable(self.vip_tickets, self.regular_tickets)
    }

    /// Number of tickets of either kind.
    #[must_use]
    pub const fn total_tickets(&self) -> u64 {
        self.vip_tickets as u64 + self.regular_tickets as u64
    }
}

/// Submitted form fields for `event_registrations`, before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    /// Name the registrant goes by.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// Active WhatsApp number.
    pub phone: String,
    /// VIP tickets requested.
    pub vip_tickets: u32,
    /// Regular tickets requested.
    pub regular_tickets: u32,
}

impl NewRegistration {
    /// Checks that the personal fields are filled in and the counts fit
    /// the ticket columns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] naming the first blank field or
    /// oversized count.
    pub fn validate(&self) -> Result<(), AppError> {
        require_filled("nama", &self.display_name)?;
        require_filled("asal kota", &self.city)?;
        require_filled("nomor WA", &self.phone)?;
        require_storable("tiket VIP", self.vip_tickets)?;
        require_storable("tiket reguler", self.regular_tickets)?;
        Ok(())
    }

    /// Builds the pending record owned by `user_id`.
    #[must_use]
    pub fn into_registration(self, user_id: Uuid, proof_url: Option<String>) -> Registration {
        Registration {
            id: RegistrationId::generate(),
            user_id,
            display_name: self.display_name.trim().to_string(),
            city: self.city.trim().to_string(),
            phone: self.phone.trim().to_string(),
            vip_tickets: self.vip_tickets,
            regular_tickets: self.regular_tickets,
            proof_url,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Down payment quoted to the registrant at submission.
    #[must_use]
    pub const fn minimum_down_payment(&self, pricing: &TicketPricing) -> u64 {
        minimum_down_payment(pricing.total_payable(self.vip_tickets, self.regular_tickets))
    }
}

/// A row of `zumba_registrations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZumbaRegistration {
    /// Row identifier.
    pub id: RegistrationId,
    /// Owning identity-provider user.
    pub user_id: Uuid,
    /// Always [`ZUMBA_EVENT_NAME`] for rows created by this service.
    pub event_name: String,
    /// Selected tier.
    pub tier: ZumbaTier,
    /// Unit price at the time of submission.
    pub ticket_price: u64,
    /// Registrant name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// Number of tickets, at least one.
    pub ticket_count: u32,
    /// `ticket_price × ticket_count`.
    pub total_cost: u64,
    /// Public URL of the transfer proof. Required for this event.
    pub proof_url: String,
    /// Verification state.
    pub payment_status: PaymentStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Submitted form fields for `zumba_registrations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewZumbaRegistration {
    /// Selected tier.
    pub tier: ZumbaTier,
    /// Registrant name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// Number of tickets.
    pub ticket_count: u32,
}

impl NewZumbaRegistration {
    /// Checks personal fields and that at least one ticket is booked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] on a blank field, zero tickets
    /// or a count above [`MAX_TICKET_COUNT`].
    pub fn validate(&self) -> Result<(), AppError> {
        require_filled("nama", &self.display_name)?;
        require_filled("asal kota", &self.city)?;
        require_filled("nomor WA", &self.phone)?;
        if self.ticket_count == 0 {
            return Err(AppError::InvalidRequest(
                "jumlah tiket minimal 1".to_string(),
            ));
        }
        require_storable("jumlah tiket", self.ticket_count)?;
        Ok(())
    }

    /// Builds the pending record owned by `user_id`, pricing it from the tier.
    #[must_use]
    pub fn into_registration(self, user_id: Uuid, proof_url: String) -> ZumbaRegistration {
        ZumbaRegistration {
            id: RegistrationId::generate(),
            user_id,
            event_name: ZUMBA_EVENT_NAME.to_string(),
            tier: self.tier,
            ticket_price: self.tier.price(),
            display_name: self.display_name.trim().to_string(),
            city: self.city.trim().to_string(),
            phone: self.phone.trim().to_string(),
            ticket_count: self.ticket_count,
            total_cost: self.tier.total_cost(self.ticket_count),
            proof_url,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

fn require_filled(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} harus diisi")));
    }
    Ok(())
}

fn require_storable(field: &str, count: u32) -> Result<(), AppError> {
    if count > MAX_TICKET_COUNT {
        return Err(AppError::InvalidRequest(format!(
            "{field} terlalu banyak: {count}"
        )));
    }
    Ok(())
}
