//! Inventory API Handlers

use axum::{Json, extract::State};
use shared::models::{InventoryList, InventoryReload};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/inventory - 全部商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<InventoryList>> {
    let products = state.inventory.list();
    Ok(Json(InventoryList {
        count: products.len(),
        products,
    }))
}

/// POST /api/inventory/reload - 重新读取清单文件
pub async fn reload(State(state): State<ServerState>) -> AppResult<Json<InventoryReload>> {
    let inventory = state.inventory.clone();
    let count = tokio::task::spawn_blocking(move || inventory.reload())
        .await
        .map_err(|e| AppError::internal(format!("Inventory reload task failed: {e}")))??;
    Ok(Json(InventoryReload::loaded(count)))
}
