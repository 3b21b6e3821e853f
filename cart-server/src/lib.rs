//! Cart Server - 智能购物车收银后端
//!
//! # 架构概述
//!
//! 扫码枪 (ESP32) 上报条码 → 商品查找 → 内存购物车 → 交易流水 →
//! 前端轮询购物车 → 支付 (网关 / 现金) → 电子小票。
//!
//! - **商品** (`inventory`): CSV 清单，内存表，可热重载
//! - **购物车** (`carts`): 进程内会话，按 cartId 串行化修改
//! - **流水** (`ledger`): SurrealDB 持久化，异步 worker 写入
//! - **账单** (`bill`): 单例账单总额
//! - **支付** (`payment`): 网关订单 + HMAC 签名校验，现金收款
//! - **小票** (`receipt`): SMTP 邮件 (askama 模板)
//! - **HTTP API** (`api`): RESTful JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! cart-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── inventory/     # 商品清单
//! ├── carts/         # 购物车
//! ├── ledger/        # 交易流水
//! ├── bill/          # 账单
//! ├── payment/       # 支付
//! ├── receipt/       # 电子小票
//! └── utils/         # 日志、金额、校验
//! ```

pub mod api;
pub mod bill;
pub mod carts;
pub mod core;
pub mod db;
pub mod inventory;
pub mod ledger;
pub mod payment;
pub mod receipt;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____                      __     ______           __
  / ___/____ ___  ____ ______/ /_   / ____/___ ______/ /_
  \__ \/ __ `__ \/ __ `/ ___/ __/  / /   / __ `/ ___/ __/
 ___/ / / / / / / /_/ / /  / /_   / /___/ /_/ / /  / /_
/____/_/ /_/ /_/\__,_/_/   \__/   \____/\__,_/_/   \__/
    "#
    );
}
