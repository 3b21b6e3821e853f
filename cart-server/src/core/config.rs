use std::path::PathBuf;

/// 服务器配置 - 收银后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | PORT | 3000 | HTTP 服务端口 |
/// | INVENTORY_PATH | inventory.csv | 商品清单文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | ALLOW_ALL_ORIGINS | false | 是否允许任意跨域来源 |
/// | FRONTEND_ORIGINS | http://localhost:5173,http://127.0.0.1:5173 | 允许的前端来源 (逗号分隔) |
/// | RAZORPAY_KEY_ID | - | 支付网关 key id |
/// | RAZORPAY_KEY_SECRET | - | 支付网关 key secret |
/// | RAZORPAY_API_BASE | https://api.razorpay.com/v1 | 支付网关 REST 地址 |
/// | PAYMENT_CURRENCY | INR | 下单币种 |
/// | EMAIL_USER | - | SMTP 用户 (同时作为发件人) |
/// | EMAIL_PASSWORD | - | SMTP 密码 |
/// | SMTP_HOST | smtp.gmail.com | SMTP 服务器 |
/// | SMTP_PORT | 587 | SMTP 端口 |
/// | STORE_NAME | Smart Cart | 小票上显示的店名 |
/// | LEDGER_BUFFER_SIZE | 1024 | 流水异步写入通道容量 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// PORT=8080 INVENTORY_PATH=/srv/pos/inventory.csv cargo run -p cart-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 商品清单 (CSV: barcode,name,category,price)
    pub inventory_path: String,
    /// 运行环境: development | production
    pub environment: String,
    /// 默认日志级别
    pub log_level: String,

    // === CORS ===
    /// 允许任意来源
    pub allow_all_origins: bool,
    /// 允许的前端来源
    pub frontend_origins: Vec<String>,

    // === 支付网关 ===
    pub razorpay_key_id: Option<String>,
    pub razorpay_key_secret: Option<String>,
    pub razorpay_api_base: String,
    pub payment_currency: String,

    // === 邮件小票 ===
    pub email_user: Option<String>,
    pub email_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub store_name: String,

    /// 流水异步写入通道容量
    pub ledger_buffer_size: usize,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// 读取非空环境变量
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// 逗号分隔列表，忽略空项
pub(crate) fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值；支付与邮件凭据缺失时对应功能关闭
    pub fn from_env() -> Self {
        Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port: env_parse("PORT", 3000),
            inventory_path: env_or("INVENTORY_PATH", "inventory.csv"),
            environment: env_or("ENVIRONMENT", "development"),
            log_level: env_or("LOG_LEVEL", "info"),

            allow_all_origins: env_parse("ALLOW_ALL_ORIGINS", false),
            frontend_origins: parse_origins(&env_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)),

            razorpay_key_id: env_opt("RAZORPAY_KEY_ID"),
            razorpay_key_secret: env_opt("RAZORPAY_KEY_SECRET"),
            razorpay_api_base: env_or("RAZORPAY_API_BASE", "https://api.razorpay.com/v1"),
            payment_currency: env_or("PAYMENT_CURRENCY", "INR"),

            email_user: env_opt("EMAIL_USER"),
            email_password: env_opt("EMAIL_PASSWORD"),
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env_parse("SMTP_PORT", 587),
            store_name: env_or("STORE_NAME", "Smart Cart"),

            ledger_buffer_size: env_parse("LEDGER_BUFFER_SIZE", 1024),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景：外部凭据全部清空，避免测试触达真实网关或邮箱
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.razorpay_key_id = None;
        config.razorpay_key_secret = None;
        config.email_user = None;
        config.email_password = None;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 邮件小票是否已配置
    pub fn mail_enabled(&self) -> bool {
        self.email_user.is_some() && self.email_password.is_some()
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
