//! Order Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{Order, OrderLine};

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        self.base.create_and_fetch(TABLE, order).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn find_all(
        &self,
        salon_id: &str,
        customer_id: Option<&str>,
    ) -> RepoResult<Vec<Order>> {
        let mut query =
            String::from("SELECT *, <string>id AS id FROM order WHERE salon = $salon");
        if customer_id.is_some() {
            query.push_str(" AND customer = $customer");
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut q = self
            .base
            .db()
            .query(query)
            .bind(("salon", qualify("salon", salon_id)));
        if let Some(customer) = customer_id {
            q = q.bind(("customer", qualify("customer", customer)));
        }
        let orders: Vec<Order> = q.await?.take(0)?;
        Ok(orders)
    }

    /// Persist the rendered invoice's retrieval URL
    pub async fn set_invoice_url(&self, id: &str, url: &str) -> RepoResult<Order> {
        #[derive(Serialize)]
        struct Patch {
            invoice_pdf_url: String,
        }
        self.base
            .merge_and_fetch(
                TABLE,
                id,
                Patch {
                    invoice_pdf_url: url.to_string(),
                },
            )
            .await
    }

    /// Replace the line set and total after a re-price
    pub async fn replace_lines(
        &self,
        id: &str,
        products: Vec<OrderLine>,
        total_price: f64,
    ) -> RepoResult<Order> {
        #[derive(Serialize)]
        struct Patch {
            products: Vec<OrderLine>,
            total_price: f64,
        }
        self.base
            .merge_and_fetch(
                TABLE,
                id,
                Patch {
                    products,
                    total_price,
                },
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
