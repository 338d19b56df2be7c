use std::sync::Arc;

use domain::{
    Car, CarId, CarPatch, CarRepository, NewCar, PricePredictor, RepositoryError, WriteOutcome,
};
use serde_json::Value;

use crate::error::ApplicationError;

pub struct CarServiceDependencies {
    pub car_repository: Arc<dyn CarRepository>,
    pub price_predictor: Arc<dyn PricePredictor>,
}

pub struct CarService {
    deps: CarServiceDependencies,
}

impl CarService {
    pub fn new(deps: CarServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>, ApplicationError> {
        Ok(self.deps.car_repository.list().await?)
    }

    pub async fn get_car(&self, id: CarId) -> Result<Car, ApplicationError> {
        self.deps
            .car_repository
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::Repository(RepositoryError::NotFound))
    }

    /// 缺少 make 或 price 时不会访问数据库
    pub async fn add_car(&self, payload: &Value) -> Result<WriteOutcome, ApplicationError> {
        let new_car = NewCar::from_json(payload)?;
        let outcome = self.deps.car_repository.insert(&new_car).await?;

        tracing::info!(car_id = outcome.insert_id, make = new_car.make(), "car added");
        Ok(outcome)
    }

    pub async fn update_car(
        &self,
        id: CarId,
        payload: &Value,
    ) -> Result<WriteOutcome, ApplicationError> {
        let patch = CarPatch::from_json(payload)?;
        Ok(self.deps.car_repository.update(id, &patch).await?)
    }

    pub async fn delete_car(&self, id: CarId) -> Result<(), ApplicationError> {
        self.deps.car_repository.delete(id).await?;
        Ok(())
    }

    /// 调用预测服务，成功后只回写价格列
    ///
    /// 预测失败时直接返回错误，数据库不会被修改。
    pub async fn predict_price(
        &self,
        id: CarId,
        features: Value,
    ) -> Result<f64, ApplicationError> {
        let predicted_price = self.deps.price_predictor.predict(id, features).await?;

        self.deps
            .car_repository
            .update(id, &CarPatch::price(predicted_price))
            .await?;

        tracing::info!(car_id = %id, predicted_price, "car price updated from prediction");
        Ok(predicted_price)
    }
}
