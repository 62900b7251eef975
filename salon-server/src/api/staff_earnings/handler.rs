//! Staff Earning API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::StaffEarningRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{StaffEarningView, StaffPayment, StaffPayoutRequest};

/// GET /api/staff-earnings - 全量重算并返回每位员工的收益
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<StaffEarningView>>> {
    let views = state.earnings().recompute(&query.salon_id).await?;
    Ok(Json(views))
}

/// GET /api/staff-earnings/:id - 单个员工的未结算收益
pub async fn get_by_staff(
    State(state): State<ServerState>,
    Path(staff_id): Path<String>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<StaffEarningView>> {
    let view = state
        .earnings()
        .staff_detail(&query.salon_id, &staff_id)
        .await?;
    Ok(Json(view))
}

/// POST /api/staff-earnings/pay/:staff_id - 结算员工收益
pub async fn payout(
    State(state): State<ServerState>,
    Path(staff_id): Path<String>,
    Json(payload): Json<StaffPayoutRequest>,
) -> AppResult<(StatusCode, Json<StaffPayment>)> {
    let payment = state.earnings().payout(&staff_id, payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// DELETE /api/staff-earnings/:id - 删除收益聚合记录
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<bool>> {
    let repo = StaffEarningRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .filter(|e| e.salon == crate::db::repository::qualify("salon", &query.salon_id));
    if existing.is_none() {
        return Err(AppError::not_found(format!(
            "Staff earning {} not found",
            id
        )));
    }
    repo.delete(&id).await?;
    Ok(Json(true))
}
