//! Salon Repository

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{BaseRepository, RepoResult};
use shared::models::{Salon, SalonCreate, SalonUpdate};

const TABLE: &str = "salon";

#[derive(Clone)]
pub struct SalonRepository {
    base: BaseRepository,
}

impl SalonRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Salon>> {
        let salons: Vec<Salon> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM salon ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(salons)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Salon>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn create(&self, data: SalonCreate) -> RepoResult<Salon> {
        let salon = Salon {
            id: None,
            salon_name: data.salon_name,
            address: data.address,
            contact_number: data.contact_number,
            contact_email: data.contact_email,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, salon).await
    }

    pub async fn update(&self, id: &str, data: SalonUpdate) -> RepoResult<Salon> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
