use anyhow::Context;
use cart_server::{Config, Server, cleanup_old_logs, init_logger_with_file, print_banner};

/// 保留最近 N 天的滚动日志
const LOG_RETENTION_DAYS: i64 = 14;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env (不存在时忽略)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志 (guard 必须存活到进程结束)
    let log_dir = config.logs_dir();
    let _log_guard = init_logger_with_file(
        &config.log_level,
        config.is_production(),
        Some(log_dir.as_path()),
    )
    .context("failed to initialize logger")?;

    match cleanup_old_logs(&log_dir, LOG_RETENTION_DAYS) {
        Ok(0) => {}
        Ok(n) => tracing::info!(removed = n, "Old log files cleaned up"),
        Err(e) => tracing::warn!(error = %e, "Log cleanup failed"),
    }

    print_banner();
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        inventory = %config.inventory_path,
        "🛒 Cart Server starting..."
    );

    // 4. 启动 HTTP 服务器 (初始化状态、后台 worker)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
