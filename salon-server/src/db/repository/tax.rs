//! Tax Repository

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{Tax, TaxCreate, TaxUpdate};

const TABLE: &str = "tax";

#[derive(Clone)]
pub struct TaxRepository {
    base: BaseRepository,
}

impl TaxRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Tax>> {
        let taxes: Vec<Tax> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM tax WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(taxes)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Tax>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn create(&self, data: TaxCreate) -> RepoResult<Tax> {
        let tax = Tax {
            id: None,
            salon: qualify("salon", &data.salon_id),
            branches: data
                .branch_ids
                .unwrap_or_default()
                .iter()
                .map(|b| qualify("branch", b))
                .collect(),
            title: data.title,
            value: data.value,
            tax_type: data.tax_type,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, tax).await
    }

    pub async fn update(&self, id: &str, data: TaxUpdate) -> RepoResult<Tax> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
