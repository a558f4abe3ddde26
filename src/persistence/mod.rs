//! Persistence layer: registration and admin tables.
//!
//! [`RegistrationStore`] and [`AdminStore`] are the seams the services
//! talk to. [`postgres::PostgresStore`] backs them with `sqlx::PgPool`;
//! [`memory::MemoryStore`] keeps rows in process for tests and local runs.
//!
//! Status updates are unconditional single-column writes: there is no
//! version column, so concurrent admins resolve as last write wins.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AdminAccount, PaymentStatus, Registration, RegistrationId, ZumbaRegistration};
use crate::error::AppError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage for `event_registrations` and `zumba_registrations`.
#[async_trait]
pub trait RegistrationStore: Send + Sync + fmt::Debug {
    /// Inserts a new `event_registrations` row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    async fn insert_registration(&self, registration: &Registration) -> Result<(), AppError>;

    /// Lists registrations newest first, restricted to `owner` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    async fn list_registrations(&self, owner: Option<Uuid>) -> Result<Vec<Registration>, AppError>;

    /// Overwrites `payment_status` and returns the row as stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RegistrationNotFound`] for an unknown id, or
    /// [`AppError::PersistenceError`] on store failure.
    async fn set_registration_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<Registration, AppError>;

    /// Inserts a new `zumba_registrations` row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    async fn insert_zumba_registration(
        &self,
        registration: &ZumbaRegistration,
    ) -> Result<(), AppError>;

    /// Lists zumba registrations newest first, restricted to `owner` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    async fn list_zumba_registrations(
        &self,
        owner: Option<Uuid>,
    ) -> Result<Vec<ZumbaRegistration>, AppError>;

    /// Overwrites `payment_status` of a zumba registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RegistrationNotFound`] for an unknown id, or
    /// [`AppError::PersistenceError`] on store failure.
    async fn set_zumba_registration_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<ZumbaRegistration, AppError>;
}

/// Storage for the `admins` table.
#[async_trait]
pub trait AdminStore: Send + Sync + fmt::Debug {
    /// Looks up an admin by exact username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    async fn find_admin_by_username(&self, username: &str)
    -> Result<Option<AdminAccount>, AppError>;

    /// Sets `last_login` for the given admin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    async fn record_login(&self, admin_id: Uuid, at: DateTime<Utc>) -> Result<(), AppError>;
}
