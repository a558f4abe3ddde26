//! Registration service: submission, listing, statistics and status changes.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    DashboardStats, NewRegistration, NewZumbaRegistration, PaymentStatus, Registration,
    RegistrationId, RevenueBasis, SessionUser, StatusFilter, TicketPricing, ZIN_GATHERING_PRICING,
    ZumbaRegistration,
};
use crate::error::AppError;
use crate::persistence::RegistrationStore;
use crate::storage::{ObjectStorage, ProofUpload, proof_object_path};

/// Orchestrates the registration workflow over a store and object storage.
///
/// Gathering and zumba proofs may go to different buckets; see
/// [`RegistrationService::with_zumba_storage`]. Submissions upload the proof first and insert the row second. There is
/// no compensation: if the insert fails after a successful upload, the
/// object stays in storage and the failure is logged.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
    storage: Arc<dyn ObjectStorage>,
    zumba_storage: Arc<dyn ObjectStorage>,
    pricing: TicketPricing,
    max_upload_bytes: usize,
}

impl RegistrationService {
    /// Creates a service for the ZIN gathering price list. Proofs of both
    /// events go to `storage` until [`Self::with_zumba_storage`] is used.
    #[must_use]
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        storage: Arc<dyn ObjectStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            zumba_storage: Arc::clone(&storage),
            storage,
            pricing: ZIN_GATHERING_PRICING,
            max_upload_bytes,
        }
    }

    /// Sends zumba proofs to their own bucket.
    #[must_use]
    pub fn with_zumba_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.zumba_storage = storage;
        self
    }

    /// Ticket prices used for totals and revenue.
    #[must_use]
    pub const fn pricing(&self) -> &TicketPricing {
        &self.pricing
    }

    /// Largest accepted proof, in bytes.
    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Stores the proof and returns its public URL.
    async fn upload_proof(
        &self,
        storage: &dyn ObjectStorage,
        user_id: Uuid,
        proof: ProofUpload,
    ) -> Result<String, AppError> {
        if proof.bytes.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                limit: self.max_upload_bytes,
            });
        }
        let path = proof_object_path(user_id, Utc::now(), proof.file_name.as_deref());
        let size = proof.bytes.len();
        let stored = storage
            .upload(&path, proof.bytes, proof.content_type.as_deref())
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        tracing::debug!(%user_id, path = %stored, size, "proof uploaded");
        Ok(storage.public_url(&stored))
    }

    /// Submits a ZIN gathering registration for `user`.
    ///
    /// An absent or empty proof is allowed; the row then has no URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`] for blank personal fields.
    /// - [`AppError::PayloadTooLarge`] for an oversized proof.
    /// - [`AppError::Upload`] if storage fails; nothing is inserted.
    /// - [`AppError::PersistenceError`] if the insert fails.
    pub async fn submit_registration(
        &self,
        user: &SessionUser,
        form: NewRegistration,
        proof: Option<ProofUpload>,
    ) -> Result<Registration, AppError> {
        form.validate()?;
        let proof_url = match proof.filter(|p| !p.is_empty()) {
            Some(proof) => Some(self.upload_proof(self.storage.as_ref(), user.id, proof).await?),
            None => None,
        };

        let registration = form.into_registration(user.id, proof_url);
        if let Err(e) = self.store.insert_registration(&registration).await {
            if let Some(url) = &registration.proof_url {
                tracing::warn!(user_id = %user.id, proof_url = %url, "insert failed after upload, proof orphaned");
            }
            return Err(e);
        }

        tracing::info!(
            registration_id = %registration.id,
            user_id = %user.id,
            vip = registration.vip_tickets,
            regular = registration.regular_tickets,
            "registration submitted"
        );
        Ok(registration)
    }

    /// Submits a Power Duo Zumba registration. The proof is mandatory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit_registration`], plus
    /// [`AppError::InvalidRequest`] when the proof is missing or the
    /// ticket count is zero.
    pub async fn submit_zumba_registration(
        &self,
        user: &SessionUser,
        form: NewZumbaRegistration,
        proof: Option<ProofUpload>,
    ) -> Result<ZumbaRegistration, AppError> {
        form.validate()?;
        let Some(proof) = proof.filter(|p| !p.is_empty()) else {
            return Err(AppError::InvalidRequest(
                "Mohon lengkapi semua data!".to_string(),
            ));
        };
        let proof_url = self
            .upload_proof(self.zumba_storage.as_ref(), user.id, proof)
            .await?;

        let registration = form.into_registration(user.id, proof_url);
        if let Err(e) = self.store.insert_zumba_registration(&registration).await {
            tracing::warn!(user_id = %user.id, proof_url = %registration.proof_url, "insert failed after upload, proof orphaned");
            return Err(e);
        }

        tracing::info!(
            registration_id = %registration.id,
            user_id = %user.id,
            tier = %registration.tier,
            tickets = registration.ticket_count,
            "zumba registration submitted"
        );
        Ok(registration)
    }

    /// Registrations visible on `user`'s dashboard.
    ///
    /// Users matched by [`SessionUser::is_admin`] see every row, others
    /// only their own.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    pub async fn registrations_for(
        &self,
        user: &SessionUser,
        filter: StatusFilter,
    ) -> Result<Vec<Registration>, AppError> {
        let owner = (!user.is_admin()).then_some(user.id);
        let rows = self.store.list_registrations(owner).await?;
        Ok(apply_filter(rows, filter))
    }

    /// Every registration, for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    pub async fn all_registrations(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<Registration>, AppError> {
        let rows = self.store.list_registrations(None).await?;
        Ok(apply_filter(rows, filter))
    }

    /// Statistics over the rows visible to `user`, revenue over all of them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    pub async fn stats_for(&self, user: &SessionUser) -> Result<DashboardStats, AppError> {
        let rows = self.registrations_for(user, StatusFilter::All).await?;
        Ok(DashboardStats::compute(
            &rows,
            &self.pricing,
            RevenueBasis::AllRows,
        ))
    }

    /// Statistics over every row, revenue over paid rows only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    pub async fn admin_stats(&self) -> Result<DashboardStats, AppError> {
        let rows = self.store.list_registrations(None).await?;
        Ok(DashboardStats::compute(
            &rows,
            &self.pricing,
            RevenueBasis::PaidOnly,
        ))
    }

    /// Sets the payment status of a registration, returning the stored row.
    ///
    /// Writing the current value again succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RegistrationNotFound`] or
    /// [`AppError::PersistenceError`].
    pub async fn update_payment_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<Registration, AppError> {
        let updated = self.store.set_registration_status(id, status).await?;
        tracing::info!(registration_id = %id, status = %status, "payment status updated");
        Ok(updated)
    }

    /// Zumba registrations owned by `user`, or all of them when `user` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PersistenceError`] on store failure.
    pub async fn zumba_registrations(
        &self,
        user: Option<&SessionUser>,
        filter: StatusFilter,
    ) -> Result<Vec<ZumbaRegistration>, AppError> {
        let rows = self
            .store
            .list_zumba_registrations(user.map(|u| u.id))
            .await?;
        Ok(rows
            .into_iter()
            .filter(|r| filter.matches(r.payment_status))
            .collect())
    }

    /// Sets the payment status of a zumba registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RegistrationNotFound`] or
    /// [`AppError::PersistenceError`].
    pub async fn update_zumba_payment_status(
        &self,
        id: RegistrationId,
        status: PaymentStatus,
    ) -> Result<ZumbaRegistration, AppError> {
        let updated = self.store.set_zumba_registration_status(id, status).await?;
        tracing::info!(registration_id = %id, status = %status, "zumba payment status updated");
        Ok(updated)
    }
}

fn apply_filter(rows: Vec<Registration>, filter: StatusFilter) -> Vec<Registration> {
    rows.into_iter()
        .filter(|r| filter.matches(r.payment_status))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ZumbaTier;
    use crate::persistence::MemoryStore;
    use crate::storage::MemoryObjectStorage;
    use async_trait::async_trait;

    /// Store whose inserts always fail.
    #[derive(Debug, Default)]
    struct BrokenStore;

    #[async_trait]
    impl RegistrationStore for BrokenStore {
        async fn insert_registration(&self, _: &Registration) -> Result<(), AppError> {
            Err(AppError::PersistenceError("connection reset".to_string()))
        }
        async fn list_registrations(&self, _: Option<Uuid>) -> Result<Vec<Registration>, AppError> {
            Ok(Vec::new())
        }
        async fn set_registration_status(
            &self,
            id: RegistrationId,
            _: PaymentStatus,
        ) -> Result<Registration, AppError> {
            Err(AppError::RegistrationNotFound(id.uuid()))
        }
        async fn insert_zumba_registration(&self, _: &ZumbaRegistration) -> Result<(), AppError> {
            Err(AppError::PersistenceError("connection reset".to_string()))
        }
        async fn list_zumba_registrations(
            &self,
            _: Option<Uuid>,
        ) -> Result<Vec<ZumbaRegistration>, AppError> {
            Ok(Vec::new())
        }
        async fn set_zumba_registration_status(
            &self,
            id: RegistrationId,
            _: PaymentStatus,
        ) -> Result<ZumbaRegistration, AppError> {
            Err(AppError::RegistrationNotFound(id.uuid()))
        }
    }

    fn user(email: &str) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            full_name: Some("Dewi".to_string()),
        }
    }

    fn form(vip: u32, regular: u32) -> NewRegistration {
        NewRegistration {
            display_name: "Dewi".to_string(),
            city: "Denpasar".to_string(),
            phone: "08123456789".to_string(),
            vip_tickets: vip,
            regular_tickets: regular,
        }
    }

    fn proof(len: usize) -> ProofUpload {
        ProofUpload {
            file_name: Some("bukti.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF; len],
        }
    }

    fn service(
        store: Arc<dyn RegistrationStore>,
        storage: Arc<MemoryObjectStorage>,
    ) -> RegistrationService {
        RegistrationService::new(store, storage, 1024)
    }

    #[tokio::test]
    async fn submission_uploads_then_inserts_pending_row() {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(MemoryObjectStorage::default());
        let svc = service(Arc::clone(&store) as _, Arc::clone(&storage));
        let dewi = user("dewi@example.com");

        let Ok(reg) = svc.submit_registration(&dewi, form(2, 3), Some(proof(10))).await else {
            panic!("submission failed");
        };
        assert_eq!(reg.payment_status, PaymentStatus::Pending);
        assert_eq!(reg.total_payable(svc.pricing()), 1_300_000);
        let Some(url) = reg.proof_url.as_deref() else {
            panic!("proof url missing");
        };
        assert!(url.contains("/bukti-transfer/"));
        assert!(url.ends_with(".jpg"));
        assert_eq!(storage.object_count().await, 1);
        assert_eq!(store.registration_count().await, 1);
    }

    #[tokio::test]
    async fn empty_proof_is_treated_as_absent() {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(MemoryObjectStorage::default());
        let svc = service(store, Arc::clone(&storage));

        let Ok(reg) = svc
            .submit_registration(&user("a@b.c"), form(1, 0), Some(proof(0)))
            .await
        else {
            panic!("submission failed");
        };
        assert!(reg.proof_url.is_none());
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn upload_failure_aborts_insert() {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(MemoryObjectStorage::default());
        storage.reject_uploads(true);
        let svc = service(Arc::clone(&store) as _, storage);

        let result = svc
            .submit_registration(&user("a@b.c"), form(1, 1), Some(proof(4)))
            .await;
        assert!(matches!(result, Err(AppError::Upload(_))));
        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_proof_is_rejected_before_upload() {
        let storage = Arc::new(MemoryObjectStorage::default());
        let svc = service(Arc::new(MemoryStore::new()), Arc::clone(&storage));

        let result = svc
            .submit_registration(&user("a@b.c"), form(1, 1), Some(proof(2048)))
            .await;
        assert!(matches!(result, Err(AppError::PayloadTooLarge { limit: 1024 })));
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn unstorable_count_is_rejected_before_upload() {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(MemoryObjectStorage::default());
        let svc = service(Arc::clone(&store) as _, Arc::clone(&storage));

        let result = svc
            .submit_registration(&user("a@b.c"), form(3_000_000_000, 0), Some(proof(4)))
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(storage.object_count().await, 0);
        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn insert_failure_is_persistence_error_and_leaves_object() {
        let storage = Arc::new(MemoryObjectStorage::default());
        let svc = service(Arc::new(BrokenStore), Arc::clone(&storage));

        let result = svc
            .submit_registration(&user("a@b.c"), form(1, 1), Some(proof(4)))
            .await;
        assert!(matches!(result, Err(AppError::PersistenceError(_))));
        assert_eq!(storage.object_count().await, 1);
    }

    #[tokio::test]
    async fn zumba_requires_proof() {
        let svc = service(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryObjectStorage::default()),
        );
        let form = NewZumbaRegistration {
            tier: ZumbaTier::Gold,
            display_name: "Dewi".to_string(),
            city: "Ubud".to_string(),
            phone: "0812".to_string(),
            ticket_count: 2,
        };
        let result = svc
            .submit_zumba_registration(&user("a@b.c"), form.clone(), None)
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        let Ok(reg) = svc
            .submit_zumba_registration(&user("a@b.c"), form, Some(proof(3)))
            .await
        else {
            panic!("zumba submission failed");
        };
        assert_eq!(reg.total_cost, 1_000_000);
        assert_eq!(reg.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn zumba_proofs_go_to_their_own_bucket() {
        let event_files = Arc::new(MemoryObjectStorage::new("https://cdn/event-files"));
        let zumba_files = Arc::new(MemoryObjectStorage::new("https://cdn/event-registrations"));
        let svc = service(Arc::new(MemoryStore::new()), Arc::clone(&event_files))
            .with_zumba_storage(Arc::clone(&zumba_files) as _);
        let dewi = user("dewi@example.com");
        let zumba = NewZumbaRegistration {
            tier: ZumbaTier::Green,
            display_name: "Dewi".to_string(),
            city: "Ubud".to_string(),
            phone: "0812".to_string(),
            ticket_count: 1,
        };

        let Ok(reg) = svc.submit_zumba_registration(&dewi, zumba, Some(proof(3))).await else {
            panic!("zumba submission failed");
        };
        assert!(reg.proof_url.starts_with("https://cdn/event-registrations/"));
        assert_eq!(zumba_files.object_count().await, 1);
        assert_eq!(event_files.object_count().await, 0);

        let Ok(_) = svc.submit_registration(&dewi, form(1, 0), Some(proof(3))).await else {
            panic!("submission failed");
        };
        assert_eq!(event_files.object_count().await, 1);
        assert_eq!(zumba_files.object_count().await, 1);
    }

    #[tokio::test]
    async fn heuristic_admin_sees_everyone() {
        let svc = service(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryObjectStorage::default()),
        );
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");
        let boss = user("foo+admin@bar.com");
        for u in [&alice, &bob] {
            let Ok(_) = svc.submit_registration(u, form(1, 0), None).await else {
                panic!("submission failed");
            };
        }

        let Ok(own) = svc.registrations_for(&alice, StatusFilter::All).await else {
            panic!("list failed");
        };
        assert_eq!(own.len(), 1);
        let Ok(all) = svc.registrations_for(&boss, StatusFilter::All).await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn paid_is_idempotent_and_feeds_admin_revenue() {
        let svc = service(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryObjectStorage::default()),
        );
        let u = user("a@b.c");
        let Ok(first) = svc.submit_registration(&u, form(2, 3), None).await else {
            panic!("submission failed");
        };
        let Ok(_) = svc.submit_registration(&u, form(1, 0), None).await else {
            panic!("submission failed");
        };

        let Ok(once) = svc.update_payment_status(first.id, PaymentStatus::Paid).await else {
            panic!("update failed");
        };
        let Ok(twice) = svc.update_payment_status(first.id, PaymentStatus::Paid).await else {
            panic!("repeat update failed");
        };
        assert_eq!(once, twice);

        let Ok(admin) = svc.admin_stats().await else {
            panic!("stats failed");
        };
        assert_eq!(admin.paid, 1);
        assert_eq!(admin.pending, 1);
        assert_eq!(admin.revenue, 1_300_000);

        let Ok(user_stats) = svc.stats_for(&u).await else {
            panic!("stats failed");
        };
        assert_eq!(user_stats.revenue, 1_650_000);

        let Ok(pending) = svc.all_registrations(StatusFilter::Pending).await else {
            panic!("list failed");
        };
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let svc = service(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryObjectStorage::default()),
        );
        let result = svc
            .update_payment_status(RegistrationId::generate(), PaymentStatus::Paid)
            .await;
        assert!(matches!(result, Err(AppError::RegistrationNotFound(_))));
    }
}
