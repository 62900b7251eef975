//! Staff Earning Repository (working aggregate)

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::StaffEarning;

const TABLE: &str = "staff_earning";

#[derive(Clone)]
pub struct StaffEarningRepository {
    base: BaseRepository,
}

impl StaffEarningRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<StaffEarning>> {
        let earnings: Vec<StaffEarning> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM staff_earning WHERE salon = $salon")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(earnings)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StaffEarning>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn find_by_staff(
        &self,
        salon_id: &str,
        staff_id: &str,
    ) -> RepoResult<Option<StaffEarning>> {
        let earnings: Vec<StaffEarning> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM staff_earning WHERE salon = $salon AND staff = $staff LIMIT 1")
            .bind(("salon", qualify("salon", salon_id)))
            .bind(("staff", qualify("staff", staff_id)))
            .await?
            .take(0)?;
        Ok(earnings.into_iter().next())
    }

    /// Upsert the aggregate for one staff member, keyed by salon+staff
    pub async fn upsert(&self, earning: StaffEarning) -> RepoResult<StaffEarning> {
        match self.find_by_staff(&earning.salon, &earning.staff).await? {
            Some(existing) => {
                let id = existing.id.unwrap_or_default();
                self.base.merge_and_fetch(TABLE, &id, earning).await
            }
            None => self.base.create_and_fetch(TABLE, earning).await,
        }
    }

    /// Drop the aggregate after a payout superseded it
    pub async fn delete_by_staff(&self, salon_id: &str, staff_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE staff_earning WHERE salon = $salon AND staff = $staff")
            .bind(("salon", qualify("salon", salon_id)))
            .bind(("staff", qualify("staff", staff_id)))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
