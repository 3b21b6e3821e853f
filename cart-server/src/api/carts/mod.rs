//! Cart API 模块
//!
//! 扫码枪 (ESP32) 通过 `/api/scan` 上报条码；前端轮询 `/api/cart/{cartId}`。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/scan", post(handler::scan))
        .route(
            "/api/cart/{cart_id}",
            get(handler::get_cart).delete(handler::discard),
        )
        .route("/api/cart/{cart_id}/remove", post(handler::remove_item))
        .route("/api/pay", post(handler::pay))
        .route("/api/verify", post(handler::verify))
}
