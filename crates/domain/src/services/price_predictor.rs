//! 价格预测服务接口

use async_trait::async_trait;
use serde_json::Value;

use crate::entities::CarId;
use crate::errors::PredictionError;

/// 外部价格预测服务
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PricePredictor: Send + Sync {
    /// 原样转发特征数据，返回预测价格
    async fn predict(&self, car_id: CarId, features: Value) -> Result<f64, PredictionError>;
}
