//! 主应用程序入口
//!
//! 启动车辆数据 REST 服务。

use std::sync::Arc;

use app_config::AppConfig;
use application::{CarService, CarServiceDependencies};
use domain::{CarRepository, PricePredictor};
use infrastructure::{
    create_mysql_pool, probe_connection, HttpPricePredictor, MySqlCarRepository, MIGRATOR,
};
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志，未设置 RUST_LOG 时默认 info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!(target_db = %config.database.display_target(), "连接数据库");
    let pool = create_mysql_pool(&config.database);

    // 连接失败只记录日志，服务照常启动
    match probe_connection(&pool).await {
        Ok(()) => tracing::info!("已连接 MySQL 数据库"),
        Err(err) => tracing::error!(error = %err, "数据库连接失败"),
    }

    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("数据库迁移完成");
    }

    let car_repository: Arc<dyn CarRepository> = Arc::new(MySqlCarRepository::new(pool.clone()));
    let price_predictor: Arc<dyn PricePredictor> =
        Arc::new(HttpPricePredictor::new(config.predictor.base_url.clone()));

    let car_service = CarService::new(CarServiceDependencies {
        car_repository,
        price_predictor,
    });
    let app = router(AppState::new(Arc::new(car_service)));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("车辆数据服务启动在 http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("服务已停止");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "无法监听退出信号");
    }
}
