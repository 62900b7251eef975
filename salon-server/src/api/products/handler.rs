//! Product API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::money;
use crate::utils::{AppError, AppResult};
use shared::models::{
    Product, ProductCreate, ProductUpdate, Variant, VariantCreate, VariantUpdate,
};

/// GET /api/products - 获取商品目录
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = ProductRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    if let Some(price) = payload.price {
        money::validate_price(price, "price")?;
    }
    let product = ProductRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price {
        money::validate_price(price, "price")?;
    }
    let product = ProductRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - 连带删除其变体
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match ProductRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Product {} not found", id))),
    }
}

// ========== Variants ==========

/// GET /api/products/:id/variants - 商品的变体列表
pub async fn list_variants(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Variant>>> {
    let variants = ProductRepository::new(state.db.clone())
        .find_variants(&id)
        .await?;
    Ok(Json(variants))
}

/// POST /api/products/:id/variants - 创建变体
pub async fn create_variant(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<VariantCreate>,
) -> AppResult<(StatusCode, Json<Variant>)> {
    payload.product_id = id;
    if let Some(price) = payload.price {
        money::validate_price(price, "price")?;
    }
    let variant = ProductRepository::new(state.db.clone())
        .create_variant(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(variant)))
}

/// GET /api/products/variants/:variant_id
pub async fn get_variant(
    State(state): State<ServerState>,
    Path(variant_id): Path<String>,
) -> AppResult<Json<Variant>> {
    let variant = ProductRepository::new(state.db.clone())
        .find_variant(&variant_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Variant {} not found", variant_id)))?;
    Ok(Json(variant))
}

/// PUT /api/products/variants/:variant_id
pub async fn update_variant(
    State(state): State<ServerState>,
    Path(variant_id): Path<String>,
    Json(payload): Json<VariantUpdate>,
) -> AppResult<Json<Variant>> {
    if let Some(price) = payload.price {
        money::validate_price(price, "price")?;
    }
    let variant = ProductRepository::new(state.db.clone())
        .update_variant(&variant_id, payload)
        .await?;
    Ok(Json(variant))
}

/// DELETE /api/products/variants/:variant_id
pub async fn delete_variant(
    State(state): State<ServerState>,
    Path(variant_id): Path<String>,
) -> AppResult<Json<bool>> {
    match ProductRepository::new(state.db.clone())
        .delete_variant(&variant_id)
        .await?
    {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!(
            "Variant {} not found",
            variant_id
        ))),
    }
}
