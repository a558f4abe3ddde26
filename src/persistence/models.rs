//! Database row models for the registration and admin tables.
//!
//! Rows mirror the column types; conversion into domain types checks the
//! few things PostgreSQL cannot express in our schema (non-negative
//! integers fitting `u32`, known status and tier strings).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AdminAccount, PaymentStatus, Registration, RegistrationId, ZumbaRegistration, ZumbaTier,
};
use crate::error::AppError;

/// A stored row from the `event_registrations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrationRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Registrant name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// VIP ticket count.
    pub vip_tickets: i32,
    /// Regular ticket count.
    pub regular_tickets: i32,
    /// Proof URL.
    pub proof_url: Option<String>,
    /// `pending` or `paid`.
    pub payment_status: String,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// A stored row from the `zumba_registrations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ZumbaRegistrationRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Event name.
    pub event_name: String,
    /// Tier display name.
    pub ticket_category: String,
    /// Unit price.
    pub ticket_price: i64,
    /// Registrant name.
    pub display_name: String,
    /// City of origin.
    pub city: String,
    /// WhatsApp number.
    pub phone: String,
    /// Ticket count.
    pub ticket_count: i32,
    /// Total cost.
    pub total_cost: i64,
    /// Proof URL.
    pub proof_url: String,
    /// `pending` or `paid`.
    pub payment_status: String,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// A stored row from the `admins` table.
#[derive(Clone, sqlx::FromRow)]
pub struct AdminRow {
    /// Primary key.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// bcrypt hash.
    pub password_hash: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AdminRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminRow")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = AppError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RegistrationId::from_uuid(row.id),
            user_id: row.user_id,
            display_name: row.display_name,
            city: row.city,
            phone: row.phone,
            vip_tickets: count_from_column("vip_tickets", row.vip_tickets)?,
            regular_tickets: count_from_column("regular_tickets", row.regular_tickets)?,
            proof_url: row.proof_url,
            payment_status: status_from_column(&row.payment_status)?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<ZumbaRegistrationRow> for ZumbaRegistration {
    type Error = AppError;

    fn try_from(row: ZumbaRegistrationRow) -> Result<Self, Self::Error> {
        let tier = ZumbaTier::from_display_name(&row.ticket_category).ok_or_else(|| {
            AppError::PersistenceError(format!("unknown ticket_category {}", row.ticket_category))
        })?;
        Ok(Self {
            id: RegistrationId::from_uuid(row.id),
            user_id: row.user_id,
            event_name: row.event_name,
            tier,
            ticket_price: amount_from_column("ticket_price", row.ticket_price)?,
            display_name: row.display_name,
            city: row.city,
            phone: row.phone,
            ticket_count: count_from_column("ticket_count", row.ticket_count)?,
            total_cost: amount_from_column("total_cost", row.total_cost)?,
            proof_url: row.proof_url,
            payment_status: status_from_column(&row.payment_status)?,
            created_at: row.created_at,
        })
    }
}

impl From<AdminRow> for AdminAccount {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            last_login: row.last_login,
        }
    }
}

/// Converts a domain ticket count to its `INTEGER` column value.
///
/// # Errors
///
/// Returns [`AppError::InvalidRequest`] if the count exceeds `i32::MAX`.
pub fn count_to_column(field: &str, count: u32) -> Result<i32, AppError> {
    i32::try_from(count)
        .map_err(|_| AppError::InvalidRequest(format!("{field} terlalu besar: {count}")))
}

/// Converts a rupiah amount to its `BIGINT` column value.
///
/// # Errors
///
/// Returns [`AppError::InvalidRequest`] if the amount exceeds `i64::MAX`.
pub fn amount_to_column(field: &str, amount: u64) -> Result<i64, AppError> {
    i64::try_from(amount)
        .map_err(|_| AppError::InvalidRequest(format!("{field} terlalu besar: {amount}")))
}

fn count_from_column(field: &str, value: i32) -> Result<u32, AppError> {
    u32::try_from(value)
        .map_err(|_| AppError::PersistenceError(format!("negative {field} in row: {value}")))
}

fn amount_from_column(field: &str, value: i64) -> Result<u64, AppError> {
    u64::try_from(value)
        .map_err(|_| AppError::PersistenceError(format!("negative {field} in row: {value}")))
}

fn status_from_column(value: &str) -> Result<PaymentStatus, AppError> {
    value
        .parse()
        .map_err(|_| AppError::PersistenceError(format!("unknown payment_status {value}")))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn row(vip: i32, status: &str) -> RegistrationRow {
        RegistrationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            display_name: "Rina".to_string(),
            city: "Bandung".to_string(),
            phone: "0812".to_string(),
            vip_tickets: vip,
            regular_tickets: 1,
            proof_url: None,
            payment_status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn converts_valid_row() {
        let Ok(reg) = Registration::try_from(row(2, "paid")) else {
            panic!("valid row must convert");
        };
        assert_eq!(reg.vip_tickets, 2);
        assert_eq!(reg.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn rejects_negative_counts() {
        assert!(Registration::try_from(row(-1, "pending")).is_err());
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Registration::try_from(row(0, "refunded")).is_err());
    }

    #[test]
    fn column_conversions_bound_check() {
        assert_eq!(count_to_column("vip", 7).ok(), Some(7));
        assert!(count_to_column("vip", u32::MAX).is_err());
        assert!(amount_to_column("total", u64::MAX).is_err());
    }
}
