//! 电子小票
//!
//! 支付完成后按邮箱发送小票。发送是非关键路径：[`dispatch`] 在后台任务中
//! 完成，失败只记日志，不影响 HTTP 响应。

pub mod mailer;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::models::PaymentItem;
use thiserror::Error;

use crate::utils::validation::non_blank;
use crate::utils::{AppError, ErrorCode, money};

pub use mailer::{ReceiptMailer, RenderedReceipt};

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<ReceiptError> for AppError {
    fn from(err: ReceiptError) -> Self {
        AppError::with_message(ErrorCode::MailDeliveryFailed, err.to_string())
    }
}

/// 不发送小票的占位邮箱
const WALK_IN_PLACEHOLDERS: [&str; 2] = ["walk-in", "walk-in customer"];

/// 空邮箱或散客占位邮箱
pub fn is_walk_in(email: Option<&str>) -> bool {
    match email.map(str::trim) {
        None | Some("") => true,
        Some(e) => WALK_IN_PLACEHOLDERS
            .iter()
            .any(|p| e.eq_ignore_ascii_case(p)),
    }
}

/// 小票数据
#[derive(Debug, Clone)]
pub struct Receipt {
    pub email: String,
    pub cart_id: String,
    pub items: Vec<PaymentItem>,
    pub total: f64,
    /// 支付方式 (ONLINE / CASH / UPI ...)
    pub method: String,
    /// 网关 paymentId 或现金流水 id
    pub reference: String,
    pub issued_at: DateTime<Utc>,
}

/// 模板用的一行 (金额已格式化)
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl Receipt {
    pub fn lines(&self) -> Vec<ReceiptLine> {
        self.items
            .iter()
            .map(|item| ReceiptLine {
                // 结账页可能漏传商品名，退回条码
                name: non_blank(Some(&item.name))
                    .or_else(|| non_blank(item.barcode.as_deref()))
                    .unwrap_or("Item")
                    .to_string(),
                unit_price: money::format_amount(item.price),
                quantity: item.quantity,
                subtotal: money::format_amount(money::to_f64(
                    money::to_decimal(item.price) * rust_decimal::Decimal::from(item.quantity),
                )),
            })
            .collect()
    }
}

/// 后台发送小票
///
/// 散客 / 未配置邮件时直接跳过；发送结果只记日志
pub fn dispatch(mailer: Option<Arc<ReceiptMailer>>, receipt: Receipt) {
    if is_walk_in(Some(&receipt.email)) {
        tracing::debug!(cart_id = %receipt.cart_id, "Walk-in customer, receipt skipped");
        return;
    }
    let Some(mailer) = mailer else {
        tracing::debug!(cart_id = %receipt.cart_id, "Email service not configured, receipt skipped");
        return;
    };

    tokio::spawn(async move {
        match mailer.send(&receipt).await {
            Ok(()) => {
                tracing::info!(
                    to = %receipt.email,
                    cart_id = %receipt.cart_id,
                    reference = %receipt.reference,
                    "📧 Receipt sent"
                );
            }
            Err(e) => {
                tracing::error!(
                    to = %receipt.email,
                    cart_id = %receipt.cart_id,
                    error = %e,
                    "Failed to send receipt"
                );
            }
        }
    });
}
