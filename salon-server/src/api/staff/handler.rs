//! Staff API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::StaffRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Staff, StaffCreate, StaffUpdate};

/// GET /api/staff - 获取员工列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<Staff>>> {
    let staff = StaffRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(staff))
}

/// GET /api/staff/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Staff>> {
    let staff = StaffRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", id)))?;
    Ok(Json(staff))
}

/// POST /api/staff - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<(StatusCode, Json<Staff>)> {
    let staff = StaffRepository::new(state.db.clone()).create(payload).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

/// PUT /api/staff/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<Staff>> {
    let staff = StaffRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(staff))
}

/// DELETE /api/staff/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match StaffRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Staff {} not found", id))),
    }
}
