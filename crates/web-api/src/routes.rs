use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use domain::{Car, CarId, WriteOutcome};

use crate::{
    error::{ApiError, CarEndpoint},
    state::AppState,
};

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct WriteResponse {
    message: &'static str,
    data: WriteOutcome,
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    message: &'static str,
    prediction: f64,
}

pub fn router(state: AppState) -> Router {
    with_common_layers(
        Router::new()
            .route("/health", get(health))
            .nest("/cars_data", car_routes())
            .fallback(route_not_found)
            .method_not_allowed_fallback(route_not_found)
            .with_state(state),
    )
}

/// 请求日志、跨域与 panic 兜底
pub fn with_common_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/allCars", get(list_cars))
        .route("/addCar", post(add_car))
        .route("/carById/{car_id}", get(get_car))
        .route("/deleteCar/{car_id}", delete(delete_car))
        .route("/updateCar/{car_id}", put(update_car))
        .route("/predictCarPrice/{car_id}", post(predict_car_price))
        .method_not_allowed_fallback(route_not_found)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

// 路径或方法不匹配时都按未知路由处理
async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}

fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    ApiError::internal().into_response()
}

/// 非整数的路径参数不可能匹配任何行，直接按该端点的 404 处理
fn parse_car_id(raw: &str, endpoint: CarEndpoint) -> Result<CarId, ApiError> {
    CarId::parse(raw).ok_or_else(|| endpoint.not_found())
}

/// 未携带 JSON 请求体时按空对象处理，其余解析失败返回通用 500
fn body_or_empty(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(json!({})),
        Err(rejection) => Err(rejection.into()),
    }
}

async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = state
        .car_service
        .list_cars()
        .await
        .map_err(|err| CarEndpoint::ListCars.error(err))?;

    Ok(Json(cars))
}

async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<Car>, ApiError> {
    let endpoint = CarEndpoint::GetCar;
    let id = parse_car_id(&car_id, endpoint)?;
    let car = state
        .car_service
        .get_car(id)
        .await
        .map_err(|err| endpoint.error(err))?;

    Ok(Json(car))
}

async fn add_car(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    let payload = body_or_empty(body)?;
    let outcome = state
        .car_service
        .add_car(&payload)
        .await
        .map_err(|err| CarEndpoint::AddCar.error(err))?;

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse {
            message: "Car added successfully",
            data: outcome,
        }),
    ))
}

async fn update_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WriteResponse>, ApiError> {
    let endpoint = CarEndpoint::UpdateCar;
    let id = parse_car_id(&car_id, endpoint)?;
    let payload = body_or_empty(body)?;
    let outcome = state
        .car_service
        .update_car(id, &payload)
        .await
        .map_err(|err| endpoint.error(err))?;

    Ok(Json(WriteResponse {
        message: "Car updated successfully",
        data: outcome,
    }))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let endpoint = CarEndpoint::DeleteCar;
    let id = parse_car_id(&car_id, endpoint)?;
    state
        .car_service
        .delete_car(id)
        .await
        .map_err(|err| endpoint.error(err))?;

    Ok(Json(MessageResponse {
        message: "Car deleted successfully",
    }))
}

async fn predict_car_price(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let endpoint = CarEndpoint::PredictPrice;
    let id = parse_car_id(&car_id, endpoint)?;
    let features = body_or_empty(body)?;
    let prediction = state
        .car_service
        .predict_price(id, features)
        .await
        .map_err(|err| endpoint.error(err))?;

    Ok(Json(PredictionResponse {
        message: "Prediction successful and car price updated!",
        prediction,
    }))
}
