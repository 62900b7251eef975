//! Staff Payment Repository (payout ledger, append-only)

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::StaffPayment;

const TABLE: &str = "staff_payment";

#[derive(Clone)]
pub struct StaffPaymentRepository {
    base: BaseRepository,
}

impl StaffPaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, payment: StaffPayment) -> RepoResult<StaffPayment> {
        self.base.create_and_fetch(TABLE, payment).await
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<StaffPayment>> {
        let payments: Vec<StaffPayment> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM staff_payment WHERE salon = $salon ORDER BY paid_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(payments)
    }

    pub async fn find_by_staff(
        &self,
        salon_id: &str,
        staff_id: &str,
    ) -> RepoResult<Vec<StaffPayment>> {
        let payments: Vec<StaffPayment> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM staff_payment WHERE salon = $salon AND staff = $staff ORDER BY paid_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .bind(("staff", qualify("staff", staff_id)))
            .await?
            .take(0)?;
        Ok(payments)
    }
}
