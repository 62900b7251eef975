//! Product Repository (catalog lookup + stock)
//!
//! Stock lives on one document per product (or per variant), so a claim is
//! a single conditional UPDATE — two concurrent orders cannot both pass the
//! availability check and overdraw the same stock.

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, strip_table_prefix, BaseRepository, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate, Variant, VariantCreate, VariantUpdate};

const TABLE: &str = "product";
const VARIANT_TABLE: &str = "variant";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM product WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        self.base.fetch(TABLE, id).await
    }

    /// Tenant-scoped lookup — rejects cross-tenant references
    pub async fn find_in_salon(&self, salon_id: &str, id: &str) -> RepoResult<Option<Product>> {
        let key = strip_table_prefix(TABLE, id).to_string();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM type::thing($tb, $key) WHERE salon = $salon")
            .bind(("tb", TABLE.to_string()))
            .bind(("key", key))
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(products.into_iter().next())
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = Product {
            id: None,
            salon: qualify("salon", &data.salon_id),
            branches: data
                .branch_ids
                .unwrap_or_default()
                .iter()
                .map(|b| qualify("branch", b))
                .collect(),
            product_name: data.product_name,
            description: data.description,
            price: data.price,
            stock: data.stock,
            sku: data.sku,
            is_active: true,
            created_at: shared::util::now_millis(),
        };
        self.base.create_and_fetch(TABLE, product).await
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        // Variants have no life of their own once the product is gone
        let product_ref = qualify(TABLE, id);
        self.base
            .db()
            .query("DELETE variant WHERE product = $product")
            .bind(("product", product_ref))
            .await?;
        self.base.delete(TABLE, id).await
    }

    // ========== Variants ==========

    pub async fn find_variants(&self, product_id: &str) -> RepoResult<Vec<Variant>> {
        let variants: Vec<Variant> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM variant WHERE product = $product")
            .bind(("product", qualify(TABLE, product_id)))
            .await?
            .take(0)?;
        Ok(variants)
    }

    pub async fn find_variant(&self, id: &str) -> RepoResult<Option<Variant>> {
        self.base.fetch(VARIANT_TABLE, id).await
    }

    /// Variant lookup scoped to a product — a variant id belonging to a
    /// different product (or tenant) is not found
    pub async fn find_variant_of(
        &self,
        product_id: &str,
        variant_id: &str,
    ) -> RepoResult<Option<Variant>> {
        let key = strip_table_prefix(VARIANT_TABLE, variant_id).to_string();
        let variants: Vec<Variant> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM type::thing($tb, $key) WHERE product = $product")
            .bind(("tb", VARIANT_TABLE.to_string()))
            .bind(("key", key))
            .bind(("product", qualify(TABLE, product_id)))
            .await?
            .take(0)?;
        Ok(variants.into_iter().next())
    }

    pub async fn create_variant(&self, data: VariantCreate) -> RepoResult<Variant> {
        let variant = Variant {
            id: None,
            salon: qualify("salon", &data.salon_id),
            product: qualify(TABLE, &data.product_id),
            name: data.name,
            price: data.price,
            stock: data.stock,
            is_active: true,
        };
        self.base.create_and_fetch(VARIANT_TABLE, variant).await
    }

    pub async fn update_variant(&self, id: &str, data: VariantUpdate) -> RepoResult<Variant> {
        self.base.merge_and_fetch(VARIANT_TABLE, id, data).await
    }

    pub async fn delete_variant(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(VARIANT_TABLE, id).await
    }

    // ========== Stock ==========

    /// Claim `quantity` units of stock with a conditional decrement.
    ///
    /// Returns false when the available stock is below `quantity`. Rows
    /// without a stock figure are untracked: the claim succeeds and nothing
    /// is written.
    pub async fn claim_stock(
        &self,
        table: &str,
        id: &str,
        quantity: i64,
    ) -> RepoResult<bool> {
        let current: Option<serde_json::Value> = self.base.fetch(table, id).await?;
        let Some(row) = current else {
            return Ok(false);
        };
        if row.get("stock").map(|s| s.is_null()).unwrap_or(true) {
            return Ok(true);
        }

        let key = strip_table_prefix(table, id).to_string();
        let updated: Vec<i64> = self
            .base
            .db()
            .query("UPDATE type::thing($tb, $key) SET stock -= $qty WHERE stock >= $qty RETURN VALUE stock")
            .bind(("tb", table.to_string()))
            .bind(("key", key))
            .bind(("qty", quantity))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }

    /// Return previously claimed stock (compensation path)
    pub async fn restore_stock(&self, table: &str, id: &str, quantity: i64) -> RepoResult<()> {
        let key = strip_table_prefix(table, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing($tb, $key) SET stock += $qty WHERE stock != NONE")
            .bind(("tb", table.to_string()))
            .bind(("key", key))
            .bind(("qty", quantity))
            .await?;
        Ok(())
    }

    /// Deduct stock flooring at zero — the booking side-effect path, where
    /// the sale has already happened and stock must never go negative.
    /// Untracked rows (no stock figure) are left untouched.
    pub async fn deduct_stock_floor(
        &self,
        table: &str,
        id: &str,
        quantity: i64,
    ) -> RepoResult<()> {
        let current: Option<serde_json::Value> = self.base.fetch(table, id).await?;
        let Some(row) = current else {
            return Ok(());
        };
        if row.get("stock").map(|s| s.is_null()).unwrap_or(true) {
            return Ok(());
        }

        let key = strip_table_prefix(table, id).to_string();
        let decremented: Vec<i64> = self
            .base
            .db()
            .query("UPDATE type::thing($tb, $key) SET stock -= $qty WHERE stock >= $qty RETURN VALUE stock")
            .bind(("tb", table.to_string()))
            .bind(("key", key.clone()))
            .bind(("qty", quantity))
            .await?
            .take(0)?;
        if decremented.is_empty() {
            self.base
                .db()
                .query("UPDATE type::thing($tb, $key) SET stock = 0 WHERE stock < $qty")
                .bind(("tb", table.to_string()))
                .bind(("key", key))
                .bind(("qty", quantity))
                .await?;
        }
        Ok(())
    }
}
