//! Web API 层。
//!
//! 提供 Axum 路由，将 `/cars_data` 下的 HTTP 请求委托给应用层的车辆服务。

mod error;
mod routes;
mod state;

pub use error::{ApiError, CarEndpoint, ErrorBody};
pub use routes::{router, with_common_layers};
pub use state::AppState;
