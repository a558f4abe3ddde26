//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    AdminRow, RegistrationRow, ZumbaRegistrationRow, amount_to_column, count_to_column,
};
use super::{AdminStore, RegistrationStore};
use crate::domain::{AdminAccount, PaymentStatus, Registration, RegistrationId, ZumbaRegistration};
use crate::error::AppError;

const REGISTRATION_COLUMNS: &str = "id, user_id, display_name, city, phone, vip_tickets, \
     regular_tickets, proof_url, payment_status, created_at";

const ZUMBA_COLUMNS: &str = "id, user_id, event_name, ticket_category, ticket_price, \
     display_name, city, phone, ticket_count, total_cost, proof_url, payment_status, created_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations in `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`AppError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::PersistenceError(e.to_string()))
    }
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::PersistenceError(e.to_string())
}

#[async_trait]
impl RegistrationStore for PostgresStore {
    async fn insert_registration(&self, registration: &Registration) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO event_registrations \
             (id, user_id, display_name, city, phone, vip_tickets, regular_tickets, \
              proof_url, payment_status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(registration.id)
        .bind(registration.user_id)
        .bind(&registration.display_name)
        .bind(&registration.city)
        .bind(&registration.phone)
        .bind(count_to_column("vip_tickets", registration.vip_tickets)?)
        .bind(count_to_column("regular_tickets", registration.regular_tickets)?)
        .bind(registration.proof_url.as_deref())
        .bind(registration.payment_status.as_str())
        .bind(registration.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_registrations(&self, owner: Option<Uuid>) -> Result<Vec<Registration>, AppError> {
        let rows = if let Some(user_id) = owner {
            sqlx::query_as::<_, RegistrationRow>(&format!(
                "SELECT {REGISTRATION_COLUMNS} FROM event_registrations \
                 WHERE user_id = $1 ORDER BY created_at DESC"
            ))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, RegistrationRow>(&format!(
                "SELECT {REGISTRATION_COLUMNS} FROM event_registrations ORDER BY created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(db_err)?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn set_registration_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<Registration, AppError> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "UPDATE event_registrations SET payment_status = $1 WHERE id = $2 \
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(AppError::RegistrationNotFound(id.uuid()))?;

        Registration::try_from(row)
    }

    async fn insert_zumba_registration(
        &self,
        registration: &ZumbaRegistration,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO zumba_registrations \
             (id, user_id, event_name, ticket_category, ticket_price, display_name, city, \
              phone, ticket_count, total_cost, proof_url, payment_status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(registration.id)
        .bind(registration.user_id)
        .bind(&registration.event_name)
        .bind(registration.tier.display_name())
        .bind(amount_to_column("ticket_price", registration.ticket_price)?)
        .bind(&registration.display_name)
        .bind(&registration.city)
        .bind(&registration.phone)
        .bind(count_to_column("ticket_count", registration.ticket_count)?)
        .bind(amount_to_column("total_cost", registration.total_cost)?)
        .bind(&registration.proof_url)
        .bind(registration.payment_status.as_str())
        .bind(registration.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_zumba_registrations(
        &self,
        owner: Option<Uuid>,
    ) -> Result<Vec<ZumbaRegistration>, AppError> {
        let rows = if let Some(user_id) = owner {
            sqlx::query_as::<_, ZumbaRegistrationRow>(&format!(
                "SELECT {ZUMBA_COLUMNS} FROM zumba_registrations \
                 WHERE user_id = $1 ORDER BY created_at DESC"
            ))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, ZumbaRegistrationRow>(&format!(
                "SELECT {ZUMBA_COLUMNS} FROM zumba_registrations ORDER BY created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(db_err)?;

        rows.into_iter().map(ZumbaRegistration::try_from).collect()
    }

    async fn set_zumba_registration_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<ZumbaRegistration, AppError> {
        let row = sqlx::query_as::<_, ZumbaRegistrationRow>(&format!(
            "UPDATE zumba_registrations SET payment_status = $1 WHERE id = $2 \
             RETURNING {ZUMBA_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(AppError::RegistrationNotFound(id.uuid()))?;

        ZumbaRegistration::try_from(row)
    }
}

#[async_trait]
impl AdminStore for PostgresStore {
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AppError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, password_hash, full_name, last_login FROM admins \
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(AdminAccount::from))
    }

    async fn record_login(&self, admin_id: Uuid, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE admins SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(admin_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
