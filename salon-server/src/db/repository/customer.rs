//! Customer Repository

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};

const TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM customer WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let customer = Customer {
            id: None,
            salon: qualify("salon", &data.salon_id),
            full_name: data.full_name,
            email: data.email,
            phone_number: data.phone_number,
            gender: data.gender,
            notes: data.notes,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, customer).await
    }

    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
