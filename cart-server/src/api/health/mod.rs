//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 服务横幅 (纯文本) |
//! | /health | GET | 健康检查 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "database": "ok",
//!   "inventoryCount": 42,
//!   "activeCarts": 3,
//!   "gatewayEnabled": false,
//!   "mailEnabled": false
//! }
//! ```
//!
//! 数据库不可用时 `status` 为 `"degraded"`，`database` 为 `"error"`。

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub const BANNER: &str = "Smart Cart checkout backend is running.";

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: &'static str,
    /// 已加载商品数
    inventory_count: usize,
    /// 内存中的购物车会话数
    active_carts: usize,
    gateway_enabled: bool,
    mail_enabled: bool,
}

pub async fn banner() -> &'static str {
    BANNER
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let db_ok = match state.db.health().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if db_ok { "ok" } else { "error" },
        inventory_count: state.inventory.len(),
        active_carts: state.carts.active_count(),
        gateway_enabled: state.payments.gateway_enabled(),
        mail_enabled: state.config.mail_enabled(),
    })
}
