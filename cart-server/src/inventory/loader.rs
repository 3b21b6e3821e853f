//! 商品清单解析
//!
//! 文件格式: 首行为表头，之后每行 `barcode,name,category,price`。
//! 字段缺失、条码/名称为空、价格非数字或为负的行直接跳过。

use std::collections::HashMap;
use std::path::Path;

use shared::models::Product;

/// 解析结果
#[derive(Debug, Default)]
pub struct ParsedInventory {
    pub products: HashMap<String, Product>,
    /// 被跳过的数据行数 (不含表头、空行)
    pub skipped: usize,
}

/// Parse one data row; `None` when malformed
pub fn parse_row(line: &str) -> Option<Product> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 4 {
        return None;
    }

    let barcode = parts[0];
    let name = parts[1];
    let category = parts[2];
    if barcode.is_empty() || name.is_empty() {
        return None;
    }

    let price: f64 = parts[3].parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }

    Some(Product {
        barcode: barcode.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
    })
}

/// Parse the whole file body. Later duplicates of a barcode win.
pub fn parse_inventory(content: &str) -> ParsedInventory {
    let mut parsed = ParsedInventory::default();

    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(product) => {
                parsed.products.insert(product.barcode.clone(), product);
            }
            None => {
                tracing::debug!(line = %line, "Skipping malformed inventory row");
                parsed.skipped += 1;
            }
        }
    }

    parsed
}

/// Read and parse the inventory file
///
/// A missing file is not an error: it yields an empty inventory.
pub fn load_file(path: &Path) -> std::io::Result<ParsedInventory> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_inventory(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Inventory file not found, inventory is empty");
            Ok(ParsedInventory::default())
        }
        Err(e) => Err(e),
    }
}
