use crate::error::StoreError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// 创建目录库连接池
///
/// 连接失败直接返回错误，不在此重试。
pub async fn create_pool(database_url: &str) -> Result<PgPool, StoreError> {
    let connect_options = PgConnectOptions::from_str(database_url)?
        .log_slow_statements(tracing::log::LevelFilter::Warn, Duration::from_secs(5));

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await?;

    tracing::info!("Catalog database pool created");
    Ok(pool)
}
