//! Branch Repository

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{Branch, BranchCreate, BranchUpdate};

const TABLE: &str = "branch";

#[derive(Clone)]
pub struct BranchRepository {
    base: BaseRepository,
}

impl BranchRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all branches of a salon
    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Branch>> {
        let branches: Vec<Branch> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM branch WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(branches)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Branch>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn create(&self, data: BranchCreate) -> RepoResult<Branch> {
        let branch = Branch {
            id: None,
            salon: qualify("salon", &data.salon_id),
            name: data.name,
            address: data.address,
            contact_number: data.contact_number,
            contact_email: data.contact_email,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, branch).await
    }

    pub async fn update(&self, id: &str, data: BranchUpdate) -> RepoResult<Branch> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
