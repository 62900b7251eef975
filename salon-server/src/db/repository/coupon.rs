//! Coupon Repository

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoError, RepoResult};
use shared::models::{Coupon, CouponCreate, CouponUpdate};

const TABLE: &str = "coupon";

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM coupon WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(coupons)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Coupon>> {
        self.base.fetch(TABLE, id).await
    }

    /// Create a coupon. Dates arrive as Unix millis, already parsed at the
    /// handler boundary.
    pub async fn create(
        &self,
        data: CouponCreate,
        start_date: i64,
        end_date: i64,
    ) -> RepoResult<Coupon> {
        if end_date < start_date {
            return Err(RepoError::Validation(
                "end_date must not precede start_date".to_string(),
            ));
        }
        let coupon = Coupon {
            id: None,
            salon: qualify("salon", &data.salon_id),
            branches: data
                .branch_ids
                .unwrap_or_default()
                .iter()
                .map(|b| qualify("branch", b))
                .collect(),
            name: data.name,
            description: data.description,
            coupon_code: data.coupon_code,
            discount_type: data.discount_type,
            discount_amount: data.discount_amount,
            start_date,
            end_date,
            use_limit: data.use_limit,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, coupon).await
    }

    pub async fn update(
        &self,
        id: &str,
        data: CouponUpdate,
        start_date: Option<i64>,
        end_date: Option<i64>,
    ) -> RepoResult<Coupon> {
        #[derive(serde::Serialize)]
        struct Merge {
            name: Option<String>,
            description: Option<String>,
            discount_type: Option<shared::models::DiscountType>,
            discount_amount: Option<f64>,
            start_date: Option<i64>,
            end_date: Option<i64>,
            use_limit: Option<i64>,
            is_active: Option<bool>,
        }
        let merge = Merge {
            name: data.name,
            description: data.description,
            discount_type: data.discount_type,
            discount_amount: data.discount_amount,
            start_date,
            end_date,
            use_limit: data.use_limit,
            is_active: data.is_active,
        };
        self.base.merge_and_fetch(TABLE, id, merge).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
