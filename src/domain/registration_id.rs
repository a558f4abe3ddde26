//! Registration row identifier.
//!
//! Rows of `event_registrations` and `zumba_registrations` are keyed by a
//! UUID v4 generated at submission. [`RegistrationId`] keeps those keys
//! apart from user and admin UUIDs, binds straight into the `UUID` column,
//! and parses the `{id}` segment of the status routes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// Primary key of a registration in either table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Fresh key for a new submission.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps a key read back from the store.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl FromStr for RegistrationId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| AppError::InvalidRequest(format!("ID pendaftaran tidak valid: {s}")))
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
