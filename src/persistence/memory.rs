//! In-process store for tests and local development.
//!
//! Each table is a `RwLock<HashMap<...>>`. Listing sorts by
//! `created_at` descending to match the PostgreSQL queries.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AdminStore, RegistrationStore};
use crate::domain::{AdminAccount, PaymentStatus, Registration, RegistrationId, ZumbaRegistration};
use crate::error::AppError;

/// Volatile implementation of [`RegistrationStore`] and [`AdminStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    registrations: RwLock<HashMap<RegistrationId, Registration>>,
    zumba_registrations: RwLock<HashMap<RegistrationId, ZumbaRegistration>>,
    admins: RwLock<HashMap<String, AdminAccount>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisions an admin account, replacing any with the same username.
    pub async fn insert_admin(&self, account: AdminAccount) {
        self.admins
            .write()
            .await
            .insert(account.username.clone(), account);
    }

    /// Returns the admin with `username`, if provisioned.
    pub async fn admin(&self, username: &str) -> Option<AdminAccount> {
        self.admins.read().await.get(username).cloned()
    }

    /// Number of `event_registrations` rows.
    pub async fn registration_count(&self) -> usize {
        self.registrations.read().await.len()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert_registration(&self, registration: &Registration) -> Result<(), AppError> {
        let mut map = self.registrations.write().await;
        if map.contains_key(&registration.id) {
            return Err(AppError::PersistenceError(format!(
                "duplicate registration id {}",
                registration.id
            )));
        }
        map.insert(registration.id, registration.clone());
        Ok(())
    }

    async fn list_registrations(&self, owner: Option<Uuid>) -> Result<Vec<Registration>, AppError> {
        let map = self.registrations.read().await;
        let mut rows: Vec<Registration> = map
            .values()
            .filter(|r| owner.is_none_or(|user_id| r.user_id == user_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn set_registration_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<Registration, AppError> {
        let mut map = self.registrations.write().await;
        let row = map
            .get_mut(&id)
            .ok_or(AppError::RegistrationNotFound(id.uuid()))?;
        row.payment_status = status;
        Ok(row.clone())
    }

    async fn insert_zumba_registration(
        &self,
        registration: &ZumbaRegistration,
    ) -> Result<(), AppError> {
        let mut map = self.zumba_registrations.write().await;
        if map.contains_key(&registration.id) {
            return Err(AppError::PersistenceError(format!(
                "duplicate registration id {}",
                registration.id
            )));
        }
        map.insert(registration.id, registration.clone());
        Ok(())
    }

    async fn list_zumba_registrations(
        &self,
        owner: Option<Uuid>,
    ) -> Result<Vec<ZumbaRegistration>, AppError> {
        let map = self.zumba_registrations.read().await;
        let mut rows: Vec<ZumbaRegistration> = map
            .values()
            .filter(|r| owner.is_none_or(|user_id| r.user_id == user_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn set_zumba_registration_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<ZumbaRegistration, AppError> {
        let mut map = self.zumba_registrations.write().await;
        let row = map
            .get_mut(&id)
            .ok_or(AppError::RegistrationNotFound(id.uuid()))?;
        row.payment_status = status;
        Ok(row.clone())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AppError> {
        Ok(self.admin(username).await)
    }

    async fn record_login(&self, admin_id: Uuid, at: DateTime<Utc>) -> Result<(), AppError> {
        let mut admins = self.admins.write().await;
        if let Some(account) = admins.values_mut().find(|a| a.id == admin_id) {
            account.last_login = Some(at);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NewRegistration;

    fn make_registration(owner: Uuid) -> Registration {
        NewRegistration {
            display_name: "Rina".to_string(),
            city: "Bandung".to_string(),
            phone: "0812".to_string(),
            vip_tickets: 1,
            regular_tickets: 2,
        }
        .into_registration(owner, None)
    }

    #[tokio::test]
    async fn insert_and_list_by_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let _ = store.insert_registration(&make_registration(alice)).await;
        let _ = store.insert_registration(&make_registration(bob)).await;

        let Ok(mine) = store.list_registrations(Some(alice)).await else {
            panic!("list failed");
        };
        assert_eq!(mine.len(), 1);
        assert!(mine.iter().all(|r| r.user_id == alice));

        let Ok(all) = store.list_registrations(None).await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let mut older = make_registration(owner);
        older.created_at -= chrono::Duration::minutes(5);
        let newer = make_registration(owner);
        let _ = store.insert_registration(&older).await;
        let _ = store.insert_registration(&newer).await;

        let Ok(rows) = store.list_registrations(None).await else {
            panic!("list failed");
        };
        assert_eq!(rows.first().map(|r| r.id), Some(newer.id));
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        let reg = make_registration(Uuid::new_v4());
        assert!(store.insert_registration(&reg).await.is_ok());
        assert!(store.insert_registration(&reg).await.is_err());
    }

    #[tokio::test]
    async fn status_update_of_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let result = store
            .set_registration_status(RegistrationId::generate(), PaymentStatus::Paid)
            .await;
        assert!(matches!(result, Err(AppError::RegistrationNotFound(_))));
    }

    #[tokio::test]
    async fn record_login_sets_timestamp() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store
            .insert_admin(AdminAccount {
                id,
                username: "ops".to_string(),
                password_hash: String::new(),
                full_name: None,
                last_login: None,
            })
            .await;
        let now = Utc::now();
        assert!(store.record_login(id, now).await.is_ok());
        assert_eq!(store.admin("ops").await.and_then(|a| a.last_login), Some(now));
    }
}
