//! Payment API Handlers

use axum::{Json, extract::State};
use shared::models::{
    CashPaymentRequest, CashPaymentResponse, CreateOrderRequest, CreateOrderResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

use crate::api::JsonBody;
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/payment/create-order
pub async fn create_order(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    Ok(Json(state.payments.create_order(req).await?))
}

/// POST /api/payment/verify
pub async fn verify(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    Ok(Json(state.payments.verify_payment(req).await?))
}

/// POST /api/payment/cash
pub async fn cash(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<CashPaymentRequest>,
) -> AppResult<Json<CashPaymentResponse>> {
    Ok(Json(state.payments.cash_payment(req).await?))
}
