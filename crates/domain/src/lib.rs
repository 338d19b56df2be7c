//! 车辆数据核心领域模型
//!
//! 包含 `cars_data` 表对应的车辆实体、可写字段白名单、请求载荷解析，
//! 以及仓储与价格预测服务的抽象接口。

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(feature = "testing")]
pub mod testing;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
