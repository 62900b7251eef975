//! Service API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::ServiceRepository;
use crate::money;
use crate::utils::{AppError, AppResult};
use shared::models::{Service, ServiceCreate, ServiceUpdate};

/// GET /api/services - 获取服务目录
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<Service>>> {
    let services = ServiceRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(services))
}

/// GET /api/services/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Service>> {
    let service = ServiceRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {} not found", id)))?;
    Ok(Json(service))
}

/// POST /api/services - 创建服务
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<(StatusCode, Json<Service>)> {
    money::validate_price(payload.regular_price, "regular_price")?;
    let service = ServiceRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/services/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<Service>> {
    if let Some(price) = payload.regular_price {
        money::validate_price(price, "regular_price")?;
    }
    let service = ServiceRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(service))
}

/// DELETE /api/services/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match ServiceRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Service {} not found", id))),
    }
}
