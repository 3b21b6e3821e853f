//! Inventory API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/inventory", get(handler::list))
        .route("/api/inventory/reload", post(handler::reload))
}
