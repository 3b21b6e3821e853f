//! 购物车编排服务
//!
//! 购物车修改先完成 (entry 守卫内)，守卫释放后再写流水。
//! 流水写入是非关键路径：入队即返回，失败只记日志，不回滚购物车。

use std::sync::Arc;

use shared::models::{Cart, TransactionAction};

use super::{CartError, CartStore};
use crate::inventory::InventoryService;
use crate::ledger::LedgerService;

#[derive(Clone, Debug)]
pub struct CartService {
    store: Arc<CartStore>,
    inventory: InventoryService,
    ledger: Arc<LedgerService>,
}

impl CartService {
    pub fn new(inventory: InventoryService, ledger: Arc<LedgerService>) -> Self {
        Self {
            store: Arc::new(CartStore::new()),
            inventory,
            ledger,
        }
    }

    pub fn get_or_create(&self, cart_id: &str) -> Cart {
        self.store.get_or_create(cart_id)
    }

    /// 扫码加购；未知条码不修改购物车
    pub fn add_scan(&self, cart_id: &str, barcode: &str) -> Result<Cart, CartError> {
        let product = self
            .inventory
            .resolve(barcode)
            .ok_or_else(|| CartError::ProductNotFound(barcode.to_string()))?;

        let cart = self.store.add_product(cart_id, &product);

        // 记录单价，不是行小计
        self.ledger
            .append(TransactionAction::Add, product.name.clone(), product.price);

        tracing::info!(
            cart_id = %cart_id,
            barcode = %barcode,
            item = %product.name,
            total = cart.total,
            "🛒 Item scanned"
        );
        Ok(cart)
    }

    /// 移除一件；条码不在购物车中时原样返回
    pub fn remove_one(&self, cart_id: &str, barcode: &str) -> Cart {
        let removal = self.store.remove_one(cart_id, barcode);

        if let Some(unit) = removal.removed {
            self.ledger
                .append(TransactionAction::Remove, unit.name.clone(), unit.price);
            tracing::info!(
                cart_id = %cart_id,
                barcode = %barcode,
                total = removal.cart.total,
                "Item removed"
            );
        }

        removal.cart
    }

    pub fn mark_paid(&self, cart_id: &str) -> Cart {
        let cart = self.store.mark_paid(cart_id);
        tracing::info!(cart_id = %cart_id, total = cart.total, "Cart marked paid");
        cart
    }

    pub fn verify(&self, cart_id: &str) -> Result<Cart, CartError> {
        self.store
            .verify(cart_id)
            .map_err(|cart| CartError::NotPaid(Box::new(cart)))
    }

    pub fn discard(&self, cart_id: &str) -> bool {
        self.store.discard(cart_id)
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }
}
