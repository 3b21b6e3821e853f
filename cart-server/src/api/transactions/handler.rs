//! Transaction API Handlers

use axum::{Json, extract::State};
use shared::models::{Transaction, TransactionSummary};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/transactions - 全部流水，最新在前
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Transaction>>> {
    let transactions = state.ledger.list_all(true).await?;
    Ok(Json(transactions))
}

/// GET /api/transactions/stats - 营收与订单数
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<TransactionSummary>> {
    Ok(Json(state.ledger.summary().await?))
}
