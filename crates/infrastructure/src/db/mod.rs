//! Database utilities (Core DB Layer)

use std::time::Duration;

use app_config::DatabaseConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::migrate::Migrator;
use sqlx::{MySql, Pool};

pub type DbPool = Pool<MySql>;

/// `cars_data` 建表迁移（CREATE TABLE IF NOT EXISTS，可在已有表上重复执行）
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// 创建连接池。连接延迟建立，数据库不可用时服务仍可启动。
pub fn create_mysql_pool(config: &DatabaseConfig) -> DbPool {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_lazy_with(options)
}

/// 取出一个连接后立即归还，用于启动时检查数据库是否可达
pub async fn probe_connection(pool: &DbPool) -> Result<(), sqlx::Error> {
    let connection = pool.acquire().await?;
    drop(connection);
    Ok(())
}
