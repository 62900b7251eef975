//! Service Repository (catalog lookup)
//!
//! The booking engine resolves walk-in prices here. Lookups are
//! tenant-scoped: a service belonging to another salon is not found.

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, strip_table_prefix, BaseRepository, RepoResult};
use shared::models::{Service, ServiceCreate, ServiceUpdate};

const TABLE: &str = "service";

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Service>> {
        let services: Vec<Service> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM service WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(services)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        self.base.fetch(TABLE, id).await
    }

    /// Tenant-scoped lookup — rejects cross-tenant references
    pub async fn find_in_salon(&self, salon_id: &str, id: &str) -> RepoResult<Option<Service>> {
        let key = strip_table_prefix(TABLE, id).to_string();
        let services: Vec<Service> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM type::thing($tb, $key) WHERE salon = $salon")
            .bind(("tb", TABLE.to_string()))
            .bind(("key", key))
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(services.into_iter().next())
    }

    pub async fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        let service = Service {
            id: None,
            salon: qualify("salon", &data.salon_id),
            name: data.name,
            service_duration: data.service_duration,
            regular_price: data.regular_price,
            members_price: data.members_price,
            description: data.description,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, service).await
    }

    pub async fn update(&self, id: &str, data: ServiceUpdate) -> RepoResult<Service> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
