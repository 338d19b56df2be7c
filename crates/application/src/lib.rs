//! 应用层实现。
//!
//! 提供围绕车辆记录的用例服务：在任何 I/O 之前完成输入校验，
//! 再组合仓储与价格预测服务的调用。

pub mod error;
pub mod services;

pub use error::ApplicationError;
pub use services::{CarService, CarServiceDependencies};
