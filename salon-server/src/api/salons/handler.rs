//! Salon API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::ServerState;
use crate::db::repository::SalonRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Salon, SalonCreate, SalonUpdate};

/// GET /api/salons - 获取所有沙龙
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Salon>>> {
    let salons = SalonRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(salons))
}

/// GET /api/salons/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Salon>> {
    let salon = SalonRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Salon {} not found", id)))?;
    Ok(Json(salon))
}

/// POST /api/salons - 创建沙龙
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SalonCreate>,
) -> AppResult<(StatusCode, Json<Salon>)> {
    let salon = SalonRepository::new(state.db.clone()).create(payload).await?;
    Ok((StatusCode::CREATED, Json(salon)))
}

/// PUT /api/salons/:id - 更新沙龙
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SalonUpdate>,
) -> AppResult<Json<Salon>> {
    let salon = SalonRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(salon))
}

/// DELETE /api/salons/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match SalonRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Salon {} not found", id))),
    }
}
