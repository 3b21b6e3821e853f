//! 支付模块
//!
//! | 路径 | 说明 |
//! |------|------|
//! | 网关支付 | 创建网关订单 → 前端完成支付 → 校验 HMAC 签名 → 记录 `PAYMENT_COMPLETED` |
//! | 现金支付 | 直接记录 `CASH_PAYMENT` (金额为实收) |
//!
//! 两条路径成功后都会尝试发送电子小票 (后台任务，不影响响应)。

pub mod gateway;
pub mod service;
pub mod signature;

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::utils::{AppError, ErrorCode};

pub use gateway::{GatewayError, OrderNotes, OrderRequest, RazorpayClient};
pub use service::PaymentService;
pub use signature::SignatureError;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment gateway not configured")]
    NotConfigured,

    #[error("Invalid payment signature: {0}")]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(f64),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotConfigured => AppError::new(ErrorCode::PaymentGatewayNotConfigured),
            // 只给出原因类别，不回显签名
            PaymentError::Signature(e) => AppError::new(ErrorCode::PaymentSignatureInvalid)
                .with_detail("reason", e.to_string()),
            PaymentError::Gateway(e) => {
                AppError::with_message(ErrorCode::PaymentGatewayError, e.to_string())
            }
            PaymentError::InvalidAmount(amount) => AppError::with_message(
                ErrorCode::PaymentInvalidAmount,
                format!("Invalid payment amount: {amount}"),
            ),
            PaymentError::Ledger(e) => e.into(),
        }
    }
}
