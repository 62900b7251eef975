//! Branch API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::BranchRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Branch, BranchCreate, BranchUpdate};

/// GET /api/branches - 获取沙龙的所有分店
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<Branch>>> {
    let branches = BranchRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(branches))
}

/// GET /api/branches/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Branch>> {
    let branch = BranchRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Branch {} not found", id)))?;
    Ok(Json(branch))
}

/// POST /api/branches - 创建分店
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BranchCreate>,
) -> AppResult<(StatusCode, Json<Branch>)> {
    let branch = BranchRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// PUT /api/branches/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BranchUpdate>,
) -> AppResult<Json<Branch>> {
    let branch = BranchRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(branch))
}

/// DELETE /api/branches/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match BranchRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Branch {} not found", id))),
    }
}
