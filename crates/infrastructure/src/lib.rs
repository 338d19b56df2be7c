//! 基础设施层实现。
//!
//! 提供 MySQL 连接池与车辆仓储、HTTP 价格预测客户端等适配器，实现领域层定义的接口。

pub mod db;
pub mod predictor;
pub mod repository;

pub use db::{create_mysql_pool, probe_connection, DbPool, MIGRATOR};
pub use predictor::HttpPricePredictor;
pub use repository::MySqlCarRepository;
