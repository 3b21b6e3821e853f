//! Bill API Handlers

use axum::{Json, extract::State};
use shared::models::{Bill, BillReset};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/bill - 当前账单 (不存在则创建)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Bill>> {
    Ok(Json(state.bills.get_or_create().await?))
}

/// POST /api/bill/reset - 账单清零
///
/// 不清空购物车会话
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<BillReset>> {
    state.bills.reset().await?;
    Ok(Json(BillReset {
        success: true,
        message: "Bill reset successfully".to_string(),
    }))
}
