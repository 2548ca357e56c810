use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// HTTP worker 优雅关闭等待时间（秒）
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 单个任务超时时间（秒）
const TASK_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C 信号
pub async fn wait_for_shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// 服务器停止后释放资源
pub async fn close_resources(db: DatabaseConnection) {
    match timeout(Duration::from_secs(TASK_TIMEOUT_SECS), db.close()).await {
        Ok(Ok(())) => info!("Database connection pool closed"),
        Ok(Err(e)) => error!("Failed to close database connection pool: {}", e),
        Err(_) => error!(
            "Closing the database pool timed out after {} seconds",
            TASK_TIMEOUT_SECS
        ),
    }
}
