//! 车辆服务单元测试
//!
//! 使用内存仓储和 mockall 生成的预测服务替身验证各用例。

use std::sync::Arc;

use domain::testing::InMemoryCarRepository;
use domain::{CarId, DomainError, MockPricePredictor, PredictionError, RepositoryError};
use serde_json::{json, Value};

use crate::error::ApplicationError;
use crate::services::{CarService, CarServiceDependencies};

fn service_with(repository: InMemoryCarRepository, predictor: MockPricePredictor) -> CarService {
    CarService::new(CarServiceDependencies {
        car_repository: Arc::new(repository),
        price_predictor: Arc::new(predictor),
    })
}

fn sample_payload() -> Value {
    json!({
        "symboling": 3,
        "make": "alfa-romero",
        "fuel_type": "gas",
        "num_of_doors": "two",
        "horsepower": 111,
        "price": 13495
    })
}

#[tokio::test]
async fn add_then_get_returns_same_make_and_price() {
    let service = service_with(InMemoryCarRepository::new(), MockPricePredictor::new());

    let outcome = service.add_car(&sample_payload()).await.unwrap();
    assert_eq!(outcome.affected_rows, 1);

    let car = service
        .get_car(CarId::from(outcome.insert_id as i64))
        .await
        .unwrap();
    assert_eq!(car.make, "alfa-romero");
    assert_eq!(car.price, 13495.0);
}

#[tokio::test]
async fn add_without_required_fields_never_inserts() {
    let repository = InMemoryCarRepository::new();
    let service = service_with(repository.clone(), MockPricePredictor::new());

    let result = service.add_car(&json!({ "make": "audi" })).await;
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::MissingRequiredFields))
    ));

    let result = service.add_car(&json!({ "price": 17450 })).await;
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::MissingRequiredFields))
    ));
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn missing_car_is_not_found() {
    let service = service_with(InMemoryCarRepository::new(), MockPricePredictor::new());

    let err = service.get_car(CarId::from(404)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let service = service_with(InMemoryCarRepository::new(), MockPricePredictor::new());
    let outcome = service.add_car(&sample_payload()).await.unwrap();
    let id = CarId::from(outcome.insert_id as i64);

    service.delete_car(id).await.unwrap();
    let err = service.delete_car(id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn partial_update_changes_only_named_fields() {
    let service = service_with(InMemoryCarRepository::new(), MockPricePredictor::new());
    let outcome = service.add_car(&sample_payload()).await.unwrap();
    let id = CarId::from(outcome.insert_id as i64);
    let before = service.get_car(id).await.unwrap();

    service
        .update_car(id, &json!({ "horsepower": 154, "num_of_doors": "four" }))
        .await
        .unwrap();

    let after = service.get_car(id).await.unwrap();
    assert_eq!(after.horsepower, Some(154));
    assert_eq!(after.num_of_doors.as_deref(), Some("four"));
    assert_eq!(after.make, before.make);
    assert_eq!(after.price, before.price);
    assert_eq!(after.symboling, before.symboling);
    assert_eq!(after.fuel_type, before.fuel_type);
}

#[tokio::test]
async fn empty_or_unknown_update_leaves_row_unchanged() {
    let repository = InMemoryCarRepository::new();
    let service = service_with(repository.clone(), MockPricePredictor::new());
    let outcome = service.add_car(&sample_payload()).await.unwrap();
    let id = CarId::from(outcome.insert_id as i64);
    let before = repository.snapshot(id).await;

    let err = service.update_car(id, &json!({})).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::EmptyUpdate)));

    let err = service
        .update_car(id, &json!({ "horsepower": 200, "turbo": true }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnknownField { .. })
    ));

    assert_eq!(repository.snapshot(id).await, before);
}

#[tokio::test]
async fn update_of_missing_car_is_not_found() {
    let service = service_with(InMemoryCarRepository::new(), MockPricePredictor::new());
    let err = service
        .update_car(CarId::from(9), &json!({ "price": 1000 }))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn successful_prediction_updates_price() {
    let repository = InMemoryCarRepository::new();
    let mut predictor = MockPricePredictor::new();
    predictor
        .expect_predict()
        .withf(|id, features| *id == CarId::from(1) && features["horsepower"] == json!(111))
        .times(1)
        .returning(|_, _| Ok(18500.0));
    let service = service_with(repository.clone(), predictor);
    service.add_car(&sample_payload()).await.unwrap();

    let predicted = service
        .predict_price(CarId::from(1), json!({ "horsepower": 111 }))
        .await
        .unwrap();

    assert_eq!(predicted, 18500.0);
    let car = repository.snapshot(CarId::from(1)).await.unwrap();
    assert_eq!(car.price, 18500.0);
    assert_eq!(car.make, "alfa-romero");
}

#[tokio::test]
async fn rejected_prediction_keeps_stored_price() {
    let repository = InMemoryCarRepository::new();
    let mut predictor = MockPricePredictor::new();
    predictor
        .expect_predict()
        .times(1)
        .returning(|_, _| Err(PredictionError::Rejected { status: 422 }));
    let service = service_with(repository.clone(), predictor);
    service.add_car(&sample_payload()).await.unwrap();

    let err = service
        .predict_price(CarId::from(1), json!({}))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Prediction(PredictionError::Rejected { status: 422 })
    ));
    let car = repository.snapshot(CarId::from(1)).await.unwrap();
    assert_eq!(car.price, 13495.0);
}

#[tokio::test]
async fn prediction_for_missing_car_is_not_found() {
    let mut predictor = MockPricePredictor::new();
    predictor.expect_predict().returning(|_, _| Ok(9000.0));
    let service = service_with(InMemoryCarRepository::new(), predictor);

    let err = service
        .predict_price(CarId::from(77), json!({}))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn storage_failures_surface_as_repository_errors() {
    let service = service_with(
        InMemoryCarRepository::failing("connection refused"),
        MockPricePredictor::new(),
    );

    let err = service.list_cars().await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Repository(RepositoryError::Storage { ref message }) if message == "connection refused"
    ));
}
