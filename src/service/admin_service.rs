//! Admin login: credential check, token issuance, `last_login` bookkeeping.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::{AdminTokenService, verify_password};
use crate::domain::AdminProfile;
use crate::error::AppError;
use crate::persistence::AdminStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AdminLogin {
    /// Signed admin token.
    pub token: String,
    /// Public part of the admin account.
    pub admin: AdminProfile,
}

/// Authenticates admins against the `admins` table.
#[derive(Debug, Clone)]
pub struct AdminAuthService {
    store: Arc<dyn AdminStore>,
    tokens: Arc<AdminTokenService>,
}

impl AdminAuthService {
    /// Creates the service.
    #[must_use]
    pub fn new(store: Arc<dyn AdminStore>, tokens: Arc<AdminTokenService>) -> Self {
        Self { store, tokens }
    }

    /// Checks `username`/`password` and issues a token.
    ///
    /// Unknown usernames and wrong passwords fail identically. A failed
    /// `last_login` write is logged and does not fail the login.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingCredentials`] if either field is blank.
    /// - [`AppError::InvalidCredentials`] on unknown user or bad password.
    /// - [`AppError::Internal`] if the lookup or signing fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminLogin, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::MissingCredentials);
        }

        let account = self
            .store
            .find_admin_by_username(username)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let Some(account) = account else {
            tracing::warn!(username, "admin login rejected");
            return Err(AppError::InvalidCredentials);
        };

        let hash = account.password_hash.clone();
        let candidate = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("password check aborted: {e}")))?;
        if !matches {
            tracing::warn!(username, "admin login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&account)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        if let Err(e) = self.store.record_login(account.id, Utc::now()).await {
            tracing::warn!(admin_id = %account.id, error = %e, "failed to record last_login");
        }

        tracing::info!(admin_id = %account.id, username, "admin logged in");
        Ok(AdminLogin {
            token,
            admin: AdminProfile::from(&account),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::auth::hash_password_with_cost;
    use crate::domain::AdminAccount;
    use crate::persistence::MemoryStore;
    use uuid::Uuid;

    async fn fixture() -> (Arc<MemoryStore>, AdminAuthService, Arc<AdminTokenService>) {
        let store = Arc::new(MemoryStore::new());
        let Ok(hash) = hash_password_with_cost("rahasia", 4) else {
            panic!("hashing failed");
        };
        store
            .insert_admin(AdminAccount {
                id: Uuid::new_v4(),
                username: "panitia".to_string(),
                password_hash: hash,
                full_name: Some("Panitia Bali".to_string()),
                last_login: None,
            })
            .await;
        let tokens = Arc::new(AdminTokenService::new("test", chrono::Duration::hours(24)));
        let svc = AdminAuthService::new(Arc::clone(&store) as _, Arc::clone(&tokens));
        (store, svc, tokens)
    }

    #[tokio::test]
    async fn valid_login_issues_token_and_records_time() {
        let (store, svc, tokens) = fixture().await;
        let Ok(login) = svc.login("panitia", "rahasia").await else {
            panic!("login failed");
        };
        assert_eq!(login.admin.username, "panitia");
        let Ok(claims) = tokens.verify(&login.token) else {
            panic!("issued token does not verify");
        };
        assert_eq!(claims.id, login.admin.id);
        let Some(account) = store.admin("panitia").await else {
            panic!("admin vanished");
        };
        assert!(account.last_login.is_some());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let (_, svc, _) = fixture().await;
        let wrong = svc.login("panitia", "salah").await;
        let unknown = svc.login("siapa", "rahasia").await;
        let (Err(a), Err(b)) = (wrong, unknown) else {
            panic!("both logins must fail");
        };
        assert!(matches!(a, AppError::InvalidCredentials));
        assert!(matches!(b, AppError::InvalidCredentials));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[tokio::test]
    async fn blank_fields_are_missing_credentials() {
        let (_, svc, _) = fixture().await;
        assert!(matches!(
            svc.login("", "rahasia").await,
            Err(AppError::MissingCredentials)
        ));
        assert!(matches!(
            svc.login("panitia", "").await,
            Err(AppError::MissingCredentials)
        ));
    }
}
