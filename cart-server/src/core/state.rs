use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::bill::BillService;
use crate::carts::CartService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::inventory::InventoryService;
use crate::ledger::LedgerService;
use crate::payment::PaymentService;
use crate::receipt::ReceiptMailer;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是浅拷贝 (Arc / 句柄)，axum 每个请求 clone 一次。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 (健康检查) |
/// | inventory | InventoryService | 商品表 (可热重载) |
/// | carts | CartService | 内存购物车 + 扫码编排 |
/// | ledger | Arc<LedgerService> | 交易流水 |
/// | bills | BillService | 账单总额 |
/// | payments | PaymentService | 网关 / 现金支付 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub inventory: InventoryService,
    pub carts: CartService,
    pub ledger: Arc<LedgerService>,
    pub bills: BillService,
    pub payments: PaymentService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (work_dir/database)
    /// 2. 商品清单 (读取失败时以空表启动，可通过 reload 接口重试)
    /// 3. 交易流水 + 后台 worker
    /// 4. 购物车、账单、支付、邮件小票
    ///
    /// 必须在 tokio 运行时内调用 (worker 通过 `tokio::spawn` 启动)
    pub async fn initialize(config: &Config) -> Result<Self> {
        // 1. Database
        let db = DbService::new(&config.database_dir())
            .await
            .map_err(|e| ServerError::Database(e.message))?
            .db;

        // 2. Inventory
        let inventory = InventoryService::new(&config.inventory_path);
        if let Err(e) = inventory.reload() {
            tracing::error!(error = %e, "Inventory load failed, starting with empty inventory");
        }

        // 3. Ledger
        let (ledger, rx) = LedgerService::new(db.clone(), config.ledger_buffer_size);
        tokio::spawn(ledger.worker().run(rx));

        // 4. Domain services
        let carts = CartService::new(inventory.clone(), ledger.clone());
        let bills = BillService::new(db.clone(), ledger.clone());

        let mailer = ReceiptMailer::from_config(config)
            .map_err(|e| ServerError::Config(format!("SMTP transport: {e}")))?
            .map(Arc::new);
        let payments = PaymentService::from_config(config, ledger.clone())
            .map_err(|e| ServerError::Config(format!("Payment gateway client: {e}")))?
            .with_mailer(mailer);

        if !payments.gateway_enabled() {
            tracing::warn!("Payment gateway credentials not set, online payments disabled");
        }
        if !config.mail_enabled() {
            tracing::warn!("Email credentials not set, receipts disabled");
        }

        Ok(Self {
            config: config.clone(),
            db,
            inventory,
            carts,
            ledger,
            bills,
            payments,
        })
    }
}
