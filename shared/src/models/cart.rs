//! Cart Model

use serde::{Deserialize, Serialize};

use super::Product;

/// One line in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub barcode: String,
    pub name: String,
    pub category: String,
    /// Unit price at the time of the first scan
    pub price: f64,
    /// Always >= 1; the line is dropped when it would reach 0
    pub quantity: u32,
}

impl CartItem {
    /// New line at quantity 1
    pub fn from_product(product: &Product) -> Self {
        Self {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity: 1,
        }
    }
}

/// Cart session
///
/// `total` is derived from `items` and is recomputed on every mutation.
/// `verified_status` only becomes true after `payment_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub payment_status: bool,
    pub verified_status: bool,
}

impl Cart {
    /// Empty, unpaid cart
    pub fn new(cart_id: impl Into<String>) -> Self {
        Self {
            cart_id: cart_id.into(),
            items: Vec::new(),
            total: 0.0,
            payment_status: false,
            verified_status: false,
        }
    }
}

// =============================================================================
// Request DTOs
// =============================================================================

/// POST /api/scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub cart_id: Option<String>,
    pub barcode: Option<String>,
}

/// POST /api/cart/{cartId}/remove
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub barcode: Option<String>,
}

/// POST /api/pay, POST /api/verify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRef {
    pub cart_id: Option<String>,
}

// =============================================================================
// Response DTOs
// =============================================================================

/// POST /api/pay, POST /api/verify 成功响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartStatus {
    pub success: bool,
    pub message: String,
    pub cart: Cart,
}

impl CartStatus {
    pub fn paid(cart: Cart) -> Self {
        Self {
            success: true,
            message: "Payment successful".to_string(),
            cart,
        }
    }

    pub fn verified(cart: Cart) -> Self {
        Self {
            success: true,
            message: "Cart verified".to_string(),
            cart,
        }
    }
}
