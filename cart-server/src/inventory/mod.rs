//! Inventory Service - barcode → product lookup with in-memory caching
//!
//! 商品清单在启动时从文件加载，`reload()` 显式重新读取。
//! 新表先在锁外解析完成，再在一次写锁内整体替换，扫码不会看到半填充的表。

pub mod loader;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::Product;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to read inventory file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        AppError::with_message(ErrorCode::InventoryLoadFailed, err.to_string())
    }
}

/// 内存商品表
#[derive(Clone, Debug)]
pub struct InventoryService {
    path: PathBuf,
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InventoryService {
    /// 创建空表 (尚未加载)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// 从内存数据创建 (测试、工具用)
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let service = Self::new(PathBuf::new());
        service.replace(
            products
                .into_iter()
                .map(|p| (p.barcode.clone(), p))
                .collect(),
        );
        service
    }

    /// 重新读取清单并整体替换，返回商品数量
    ///
    /// 文件不存在时清空商品表 (不报错)；其它读取错误保留旧表并返回错误
    pub fn reload(&self) -> Result<usize, InventoryError> {
        let parsed = loader::load_file(&self.path).map_err(|source| InventoryError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let count = parsed.products.len();
        self.replace(parsed.products);

        tracing::info!(
            count,
            skipped = parsed.skipped,
            path = %self.path.display(),
            "📦 Inventory loaded"
        );
        Ok(count)
    }

    fn replace(&self, products: HashMap<String, Product>) {
        *self.products.write() = products;
    }

    /// 按条码查找商品
    pub fn resolve(&self, barcode: &str) -> Option<Product> {
        self.products.read().get(barcode).cloned()
    }

    /// 全部商品 (按条码排序)
    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.read().values().cloned().collect();
        products.sort_by(|a, b| a.barcode.cmp(&b.barcode));
        products
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}
