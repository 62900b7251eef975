//! Staff Repository

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{Staff, StaffCreate, StaffUpdate};

const TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM staff WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(staff)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        self.base.fetch(TABLE, id).await
    }

    /// Tenant-scoped lookup
    pub async fn find_in_salon(&self, salon_id: &str, id: &str) -> RepoResult<Option<Staff>> {
        let key = super::strip_table_prefix(TABLE, id).to_string();
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM type::thing($tb, $key) WHERE salon = $salon")
            .bind(("tb", TABLE.to_string()))
            .bind(("key", key))
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(staff.into_iter().next())
    }

    pub async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        let staff = Staff {
            id: None,
            salon: qualify("salon", &data.salon_id),
            branch: qualify("branch", &data.branch_id),
            full_name: data.full_name,
            email: data.email,
            phone_number: data.phone_number,
            gender: data.gender,
            services: data
                .service_ids
                .unwrap_or_default()
                .iter()
                .map(|s| qualify("service", s))
                .collect(),
            commission: data
                .commission_id
                .map(|c| qualify("revenue_commission", &c)),
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, staff).await
    }

    pub async fn update(&self, id: &str, data: StaffUpdate) -> RepoResult<Staff> {
        #[derive(serde::Serialize)]
        struct Merge {
            branch: Option<String>,
            full_name: Option<String>,
            email: Option<String>,
            phone_number: Option<String>,
            gender: Option<String>,
            services: Option<Vec<String>>,
            commission: Option<String>,
            is_active: Option<bool>,
        }
        let merge = Merge {
            branch: data.branch_id.map(|b| qualify("branch", &b)),
            full_name: data.full_name,
            email: data.email,
            phone_number: data.phone_number,
            gender: data.gender,
            services: data
                .service_ids
                .map(|ids| ids.iter().map(|s| qualify("service", s)).collect()),
            commission: data
                .commission_id
                .map(|c| qualify("revenue_commission", &c)),
            is_active: data.is_active,
        };
        self.base.merge_and_fetch(TABLE, id, merge).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
