//! 购物车内存存储
//!
//! 每个购物车的所有修改都在其 DashMap entry 守卫内完成，同一 cartId 的
//! 读-改-写互斥，不同购物车互不阻塞。对外只暴露快照 (clone)。

use dashmap::DashMap;
use shared::models::{Cart, CartItem, Product};

use crate::utils::money;

/// 进程内购物车表 (cartId → Cart)，重启即丢失
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Cart>,
}

/// 移除结果
#[derive(Debug, Clone)]
pub struct Removal {
    pub cart: Cart,
    /// 被移除的那一件商品 (quantity = 1)；购物车中没有该条码时为 None
    pub removed: Option<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 entry 守卫内修改购物车 (不存在则创建)
    fn with_cart<R>(&self, cart_id: &str, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut entry = self
            .carts
            .entry(cart_id.to_string())
            .or_insert_with(|| Cart::new(cart_id));
        f(entry.value_mut())
    }

    /// 返回已有购物车，或创建空购物车
    pub fn get_or_create(&self, cart_id: &str) -> Cart {
        self.with_cart(cart_id, |cart| cart.clone())
    }

    /// 加入一件商品：已有同条码则数量 +1，否则追加新行
    pub fn add_product(&self, cart_id: &str, product: &Product) -> Cart {
        self.with_cart(cart_id, |cart| {
            match cart.items.iter_mut().find(|i| i.barcode == product.barcode) {
                Some(line) => line.quantity += 1,
                None => cart.items.push(CartItem::from_product(product)),
            }
            recompute_total(cart);
            cart.clone()
        })
    }

    /// 移除一件：数量 -1，归零时删除整行；条码不存在时不做任何修改
    pub fn remove_one(&self, cart_id: &str, barcode: &str) -> Removal {
        self.with_cart(cart_id, |cart| {
            let Some(idx) = cart.items.iter().position(|i| i.barcode == barcode) else {
                return Removal {
                    cart: cart.clone(),
                    removed: None,
                };
            };

            let mut unit = cart.items[idx].clone();
            unit.quantity = 1;

            if cart.items[idx].quantity > 1 {
                cart.items[idx].quantity -= 1;
            } else {
                cart.items.remove(idx);
            }
            recompute_total(cart);

            Removal {
                cart: cart.clone(),
                removed: Some(unit),
            }
        })
    }

    /// 标记已支付 (无条件)
    pub fn mark_paid(&self, cart_id: &str) -> Cart {
        self.with_cart(cart_id, |cart| {
            cart.payment_status = true;
            cart.clone()
        })
    }

    /// 核验：仅在已支付时置 verified；未支付时返回当前快照作为错误
    pub fn verify(&self, cart_id: &str) -> Result<Cart, Cart> {
        self.with_cart(cart_id, |cart| {
            if !cart.payment_status {
                return Err(cart.clone());
            }
            cart.verified_status = true;
            Ok(cart.clone())
        })
    }

    /// 丢弃会话，返回是否存在
    pub fn discard(&self, cart_id: &str) -> bool {
        self.carts.remove(cart_id).is_some()
    }

    /// 当前会话数
    pub fn active_count(&self) -> usize {
        self.carts.len()
    }
}

/// 全量重算总额 (Σ price × quantity)
fn recompute_total(cart: &mut Cart) {
    cart.total = money::cart_total(&cart.items);
}
