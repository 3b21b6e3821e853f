//! 购物车模块
//!
//! | 类型 | 职责 |
//! |------|------|
//! | [`CartStore`] | 内存购物车表，按 cartId 串行化修改 |
//! | [`CartService`] | 扫码/移除编排：商品查找 → 购物车修改 → 流水写入 |

pub mod service;
pub mod store;

use shared::models::Cart;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

pub use service::CartService;
pub use store::{CartStore, Removal};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// 未支付就核验，携带当前购物车快照
    #[error("Payment not completed for cart {}", .0.cart_id)]
    NotPaid(Box<Cart>),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(barcode) => {
                AppError::new(ErrorCode::ProductNotFound).with_detail("barcode", barcode)
            }
            CartError::NotPaid(cart) => AppError::new(ErrorCode::CartNotPaid).with_detail(
                "cart",
                serde_json::to_value(&*cart).unwrap_or(serde_json::Value::Null),
            ),
        }
    }
}
