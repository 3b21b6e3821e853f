//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{Cart, CartRef, CartStatus, RemoveItemRequest, ScanRequest};

use crate::api::JsonBody;
use crate::core::ServerState;
use crate::utils::validation::{MAX_ID_LEN, missing_fields, non_blank, validate_len};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct DiscardResponse {
    success: bool,
    /// 会话之前是否存在
    existed: bool,
}

/// POST /api/scan - 扫码加购
pub async fn scan(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<ScanRequest>,
) -> AppResult<Json<Cart>> {
    let (Some(cart_id), Some(barcode)) = (
        non_blank(req.cart_id.as_deref()),
        non_blank(req.barcode.as_deref()),
    ) else {
        let missing = missing_fields(&[
            ("cartId", req.cart_id.as_deref()),
            ("barcode", req.barcode.as_deref()),
        ]);
        return Err(AppError::required(&missing, "Missing cartId or barcode"));
    };
    validate_len(cart_id, "cartId", MAX_ID_LEN)?;
    validate_len(barcode, "barcode", MAX_ID_LEN)?;

    let cart = state.carts.add_scan(cart_id, barcode)?;
    Ok(Json(cart))
}

/// GET /api/cart/:cartId - 获取购物车 (不存在则创建)
pub async fn get_cart(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<Cart>> {
    validate_len(&cart_id, "cartId", MAX_ID_LEN)?;
    Ok(Json(state.carts.get_or_create(&cart_id)))
}

/// DELETE /api/cart/:cartId - 结束会话
pub async fn discard(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<DiscardResponse>> {
    let existed = state.carts.discard(&cart_id);
    tracing::info!(cart_id = %cart_id, existed, "Cart session discarded");
    Ok(Json(DiscardResponse {
        success: true,
        existed,
    }))
}

/// POST /api/cart/:cartId/remove - 移除一件
///
/// 条码缺失或不在购物车中时原样返回
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(cart_id): Path<String>,
    JsonBody(req): JsonBody<RemoveItemRequest>,
) -> AppResult<Json<Cart>> {
    validate_len(&cart_id, "cartId", MAX_ID_LEN)?;
    let cart = match non_blank(req.barcode.as_deref()) {
        Some(barcode) => state.carts.remove_one(&cart_id, barcode),
        None => state.carts.get_or_create(&cart_id),
    };
    Ok(Json(cart))
}

fn required_cart_id(req: &CartRef) -> AppResult<&str> {
    let cart_id = non_blank(req.cart_id.as_deref())
        .ok_or_else(|| AppError::required(&["cartId"], "Missing cartId"))?;
    validate_len(cart_id, "cartId", MAX_ID_LEN)?;
    Ok(cart_id)
}

/// POST /api/pay - 标记已支付
pub async fn pay(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<CartRef>,
) -> AppResult<Json<CartStatus>> {
    let cart_id = required_cart_id(&req)?;
    Ok(Json(CartStatus::paid(state.carts.mark_paid(cart_id))))
}

/// POST /api/verify - 出口核验 (必须已支付)
pub async fn verify(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<CartRef>,
) -> AppResult<Json<CartStatus>> {
    let cart_id = required_cart_id(&req)?;
    let cart = state.carts.verify(cart_id)?;
    tracing::info!(cart_id = %cart_id, "Cart verified");
    Ok(Json(CartStatus::verified(cart)))
}
