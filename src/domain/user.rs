//! Identity-provider user as seen by this service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in end user, decoded from the identity provider's token.
///
/// The service never issues these; it only reads `id`, `email` and the
/// `full_name` profile field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Identity-provider user id (`sub` claim).
    pub id: Uuid,
    /// Account email, if the provider supplied one.
    pub email: Option<String>,
    /// `user_metadata.full_name`, editable by the user.
    pub full_name: Option<String>,
}

impl SessionUser {
    /// Decides whether this user gets the administrative dashboard.
    ///
    /// True when the display name equals `admin` (case-insensitive) or
    /// the email contains `admin` anywhere. Both inputs are controlled
    /// by the user, so this is a UI gate and not an authorization check:
    /// `foo+admin@bar.com` qualifies.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        let name_matches = self
            .full_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == "admin");
        let email_matches = self
            .email
            .as_deref()
            .is_some_and(|email| email.contains("admin"));
        name_matches || email_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: Option<&str>, full_name: Option<&str>) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: email.map(str::to_string),
            full_name: full_name.map(str::to_string),
        }
    }

    #[test]
    fn plus_addressed_email_counts_as_admin() {
        assert!(user(Some("foo+admin@bar.com"), None).is_admin());
    }

    #[test]
    fn full_name_admin_is_case_insensitive() {
        assert!(user(None, Some("Admin")).is_admin());
        assert!(user(Some("someone@example.com"), Some("ADMIN")).is_admin());
    }

    #[test]
    fn full_name_must_equal_admin_exactly() {
        assert!(!user(Some("someone@example.com"), Some("Administrator Budi")).is_admin());
    }

    #[test]
    fn email_substring_is_case_sensitive() {
        assert!(!user(Some("ADMIN@example.com"), None).is_admin());
    }

    #[test]
    fn regular_user_is_not_admin() {
        assert!(!user(Some("budi@example.com"), Some("Budi")).is_admin());
        assert!(!user(None, None).is_admin());
    }
}
