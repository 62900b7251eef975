//! Revenue Commission Repository
//!
//! Slot range validation happens before anything reaches this repository —
//! see `earnings::commission::validate_slots`.

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{RevenueCommission, RevenueCommissionCreate, RevenueCommissionUpdate};

const TABLE: &str = "revenue_commission";

#[derive(Clone)]
pub struct RevenueCommissionRepository {
    base: BaseRepository,
}

impl RevenueCommissionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<RevenueCommission>> {
        let rules: Vec<RevenueCommission> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM revenue_commission WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(rules)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RevenueCommission>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn create(&self, data: RevenueCommissionCreate) -> RepoResult<RevenueCommission> {
        let rule = RevenueCommission {
            id: None,
            salon: qualify("salon", &data.salon_id),
            branch: qualify("branch", &data.branch_id),
            commission_name: data.commission_name,
            commission_type: data.commission_type,
            commission: data.commission,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, rule).await
    }

    pub async fn update(
        &self,
        id: &str,
        data: RevenueCommissionUpdate,
    ) -> RepoResult<RevenueCommission> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
