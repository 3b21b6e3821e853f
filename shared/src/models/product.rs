//! Product Model

use serde::{Deserialize, Serialize};

/// Inventory product, keyed by barcode
///
/// Loaded from the inventory flat file and replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub category: String,
    /// Unit price (>= 0)
    pub price: f64,
}

/// Inventory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryList {
    pub count: usize,
    pub products: Vec<Product>,
}

/// Result of an inventory reload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReload {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

impl InventoryReload {
    pub fn loaded(count: usize) -> Self {
        Self {
            success: true,
            message: format!("Loaded {} products", count),
            count,
        }
    }
}
