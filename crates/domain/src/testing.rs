//! 测试替身
//!
//! 内存版车辆仓储，供应用层和 Web 层测试替换真实数据库。

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{Car, CarId, CarPatch, NewCar, WriteOutcome};
use crate::errors::RepositoryError;
use crate::repositories::CarRepository;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<CarId, Car>,
    last_id: i64,
}

/// 内存车辆仓储，主键从 1 开始自增
#[derive(Debug, Clone, Default)]
pub struct InMemoryCarRepository {
    table: Arc<RwLock<Table>>,
    failure: Option<String>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每个操作都返回存储错误，模拟数据库故障
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// 绕过仓储接口直接读取当前行，便于断言
    pub async fn snapshot(&self, id: CarId) -> Option<Car> {
        self.table.read().await.rows.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check(&self) -> Result<(), RepositoryError> {
        match &self.failure {
            Some(message) => Err(RepositoryError::storage(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn list(&self) -> Result<Vec<Car>, RepositoryError> {
        self.check()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, RepositoryError> {
        self.check()?;
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, car: &NewCar) -> Result<WriteOutcome, RepositoryError> {
        self.check()?;
        let mut guard = self.table.write().await;
        guard.last_id += 1;
        let id = CarId::from(guard.last_id);
        guard.rows.insert(id, Car::from_new(id, car));
        Ok(WriteOutcome {
            affected_rows: 1,
            insert_id: id.value() as u64,
        })
    }

    async fn update(&self, id: CarId, patch: &CarPatch) -> Result<WriteOutcome, RepositoryError> {
        self.check()?;
        let mut guard = self.table.write().await;
        let row = guard.rows.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        row.apply_patch(patch);
        Ok(WriteOutcome {
            affected_rows: 1,
            insert_id: 0,
        })
    }

    async fn delete(&self, id: CarId) -> Result<WriteOutcome, RepositoryError> {
        self.check()?;
        let mut guard = self.table.write().await;
        guard.rows.remove(&id).ok_or(RepositoryError::NotFound)?;
        Ok(WriteOutcome {
            affected_rows: 1,
            insert_id: 0,
        })
    }
}
