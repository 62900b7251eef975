//! Tax API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::TaxRepository;
use crate::money;
use crate::utils::{AppError, AppResult};
use shared::models::{Tax, TaxCreate, TaxUpdate};

/// GET /api/taxes - 获取税率列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<Tax>>> {
    let taxes = TaxRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(taxes))
}

/// GET /api/taxes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tax>> {
    let tax = TaxRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tax {} not found", id)))?;
    Ok(Json(tax))
}

/// POST /api/taxes - 创建税率
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TaxCreate>,
) -> AppResult<(StatusCode, Json<Tax>)> {
    money::validate_price(payload.value, "value")?;
    let tax = TaxRepository::new(state.db.clone()).create(payload).await?;
    Ok((StatusCode::CREATED, Json(tax)))
}

/// PUT /api/taxes/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TaxUpdate>,
) -> AppResult<Json<Tax>> {
    if let Some(value) = payload.value {
        money::validate_price(value, "value")?;
    }
    let tax = TaxRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(tax))
}

/// DELETE /api/taxes/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match TaxRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Tax {} not found", id))),
    }
}
