#![allow(dead_code)]

use std::sync::Arc;

use application::{CarService, CarServiceDependencies};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use domain::{testing::InMemoryCarRepository, CarRepository, MockPricePredictor, PricePredictor};
use serde_json::{json, Value};
use tower::ServiceExt;

use web_api::{router, AppState};

/// 基于内存仓储构建完整路由，预测服务不允许被调用
pub fn build_router(repository: InMemoryCarRepository) -> Router {
    build_router_with_predictor(repository, Arc::new(MockPricePredictor::new()))
}

pub fn build_router_with_predictor(
    repository: InMemoryCarRepository,
    price_predictor: Arc<dyn PricePredictor>,
) -> Router {
    let car_repository: Arc<dyn CarRepository> = Arc::new(repository);
    let car_service = CarService::new(CarServiceDependencies {
        car_repository,
        price_predictor,
    });

    router(AppState::new(Arc::new(car_service)))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn with_json(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

pub fn alfa_romero() -> Value {
    json!({
        "symboling": 3,
        "make": "alfa-romero",
        "fuel_type": "gas",
        "aspiration": "std",
        "num_of_doors": "two",
        "body_style": "convertible",
        "drive_wheels": "rwd",
        "engine_location": "front",
        "wheel_base": 88.6,
        "length": 168.8,
        "width": 64.1,
        "height": 48.8,
        "curb_weight": 2548,
        "engine_type": "dohc",
        "num_of_cylinders": "four",
        "engine_size": 130,
        "fuel_system": "mpfi",
        "bore": 3.47,
        "stroke": 2.68,
        "compression_ratio": 9.0,
        "horsepower": 111,
        "peak_rpm": 5000,
        "city_mpg": 21,
        "highway_mpg": 27,
        "price": 13495
    })
}

/// 通过接口新增一辆车并返回其主键
pub async fn add_car(app: &Router, payload: Value) -> i64 {
    let (status, body) = send(app, with_json("POST", "/cars_data/addCar", payload)).await;
    assert_eq!(status, StatusCode::CREATED, "add car failed: {body}");
    body["data"]["insertId"].as_i64().expect("insertId")
}
