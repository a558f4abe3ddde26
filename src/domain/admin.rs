//! Administrator accounts for the secondary admin login.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A row of the `admins` table. Provisioned out of band.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccount {
    /// Row identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Name shown in the admin dashboard header.
    pub full_name: Option<String>,
    /// Time of the last successful login.
    pub last_login: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("last_login", &self.last_login)
            .finish()
    }
}

/// Public view of an admin returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdminProfile {
    /// Admin id.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
}

impl From<&AdminAccount> for AdminProfile {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            full_name: account.full_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password_hash() {
        let account = AdminAccount {
            id: Uuid::new_v4(),
            username: "root".to_string(),
            password_hash: "$2b$04$secretsecretsecretsecret".to_string(),
            full_name: None,
            last_login: None,
        };
        let rendered = format!("{account:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("root"));
    }
}
