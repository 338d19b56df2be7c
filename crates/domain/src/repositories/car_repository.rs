//! 车辆仓储接口

use async_trait::async_trait;

use crate::entities::{Car, CarId, CarPatch, NewCar, WriteOutcome};
use crate::errors::RepositoryError;

/// `cars_data` 表的读写操作
///
/// 写操作在没有匹配行时返回 [`RepositoryError::NotFound`]。
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// 全表查询，顺序由数据库决定
    async fn list(&self) -> Result<Vec<Car>, RepositoryError>;

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, RepositoryError>;

    async fn insert(&self, car: &NewCar) -> Result<WriteOutcome, RepositoryError>;

    async fn update(&self, id: CarId, patch: &CarPatch) -> Result<WriteOutcome, RepositoryError>;

    async fn delete(&self, id: CarId) -> Result<WriteOutcome, RepositoryError>;
}
