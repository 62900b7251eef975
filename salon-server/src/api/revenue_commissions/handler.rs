//! Revenue Commission API Handlers
//!
//! Slot ranges are validated here, at write time: parseable "min-max"
//! strings and non-overlapping ranges. Reads can then rely on "first
//! matching slot wins" without re-checking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::RevenueCommissionRepository;
use crate::earnings::commission;
use crate::utils::{AppError, AppResult};
use shared::models::{RevenueCommission, RevenueCommissionCreate, RevenueCommissionUpdate};

/// GET /api/revenue-commissions - 获取分成规则列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<RevenueCommission>>> {
    let rules = RevenueCommissionRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(rules))
}

/// GET /api/revenue-commissions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<RevenueCommission>> {
    let rule = RevenueCommissionRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Revenue commission {} not found", id)))?;
    Ok(Json(rule))
}

/// POST /api/revenue-commissions - 创建分成规则
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RevenueCommissionCreate>,
) -> AppResult<(StatusCode, Json<RevenueCommission>)> {
    commission::validate_slots(&payload.commission)?;
    let rule = RevenueCommissionRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// PUT /api/revenue-commissions/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RevenueCommissionUpdate>,
) -> AppResult<Json<RevenueCommission>> {
    if let Some(slots) = &payload.commission {
        commission::validate_slots(slots)?;
    }
    let rule = RevenueCommissionRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(rule))
}

/// DELETE /api/revenue-commissions/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match RevenueCommissionRepository::new(state.db.clone())
        .delete(&id)
        .await?
    {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!(
            "Revenue commission {} not found",
            id
        ))),
    }
}
