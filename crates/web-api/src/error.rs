use application::ApplicationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{PredictionError, RepositoryError};
use serde::Serialize;

const INTERNAL_ERROR: &str = "An internal server error occurred.";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// 端点自身的错误：`{message, error?}`
    Message {
        message: String,
        /// 底层错误原文（驱动或下游服务）
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// 路由与中间件层的通用错误：`{error}`
    Generic { error: &'static str },
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorBody::Message { message, .. } => Some(message),
            ErrorBody::Generic { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ErrorBody::Message { error, .. } => error.as_deref(),
            ErrorBody::Generic { error } => Some(error),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status,
            body: ErrorBody::Message {
                message: message.into(),
                error,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, None)
    }

    /// 500，不暴露任何细节
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::Generic {
                error: INTERNAL_ERROR,
            },
        }
    }

    pub fn route_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody::Generic {
                error: "Route not found.",
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

// 请求体解析失败属于中间件层错误，统一返回通用 500
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::error!(error = %rejection.body_text(), "failed to parse request body");
        ApiError::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// `/cars_data` 下的各个端点
///
/// 每个端点有自己的错误文案；后端故障的状态码也按端点区分：
/// 更新与预测返回 500，其余返回 400，与既有客户端约定保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarEndpoint {
    ListCars,
    GetCar,
    AddCar,
    UpdateCar,
    DeleteCar,
    PredictPrice,
}

impl CarEndpoint {
    fn failure_message(self) -> &'static str {
        match self {
            CarEndpoint::ListCars => "Failed to fetch cars",
            CarEndpoint::GetCar => "Failed to fetch car",
            CarEndpoint::AddCar => "Failed to add car",
            CarEndpoint::UpdateCar => "Failed to update car",
            CarEndpoint::DeleteCar => "Failed to delete car",
            CarEndpoint::PredictPrice => "Internal Server Error",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            CarEndpoint::DeleteCar => "Car not found or already deleted",
            CarEndpoint::UpdateCar => "Car not found or no changes made",
            CarEndpoint::PredictPrice => "Car not found for updating price",
            CarEndpoint::ListCars | CarEndpoint::GetCar | CarEndpoint::AddCar => "Car not found",
        }
    }

    pub fn backend_failure_status(self) -> StatusCode {
        match self {
            CarEndpoint::UpdateCar | CarEndpoint::PredictPrice => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(self) -> ApiError {
        ApiError::not_found(self.not_found_message())
    }

    /// 将应用层错误映射为该端点的 HTTP 响应
    pub fn error(self, err: ApplicationError) -> ApiError {
        match err {
            ApplicationError::Domain(err) => ApiError::bad_request(err.to_string()),
            ApplicationError::Repository(RepositoryError::NotFound) => self.not_found(),
            ApplicationError::Repository(RepositoryError::Storage { message }) => {
                tracing::error!(endpoint = ?self, error = %message, "{}", self.failure_message());
                ApiError::new(
                    self.backend_failure_status(),
                    self.failure_message(),
                    Some(message),
                )
            }
            ApplicationError::Prediction(PredictionError::Rejected { status }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                ApiError::new(status, "Prediction failed.", None)
            }
            ApplicationError::Prediction(err) => {
                tracing::error!(endpoint = ?self, error = %err, "error predicting car price");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some(err.to_string()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    fn storage_error() -> ApplicationError {
        ApplicationError::Repository(RepositoryError::storage("Table 'cars.cars_data' doesn't exist"))
    }

    #[test]
    fn backend_failures_keep_per_endpoint_status() {
        for endpoint in [
            CarEndpoint::ListCars,
            CarEndpoint::GetCar,
            CarEndpoint::AddCar,
            CarEndpoint::DeleteCar,
        ] {
            assert_eq!(endpoint.error(storage_error()).status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(
            CarEndpoint::UpdateCar.error(storage_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            CarEndpoint::PredictPrice.error(storage_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn backend_failure_carries_driver_text() {
        let err = CarEndpoint::AddCar.error(storage_error());
        assert_eq!(err.body().message(), Some("Failed to add car"));
        assert_eq!(
            err.body().error(),
            Some("Table 'cars.cars_data' doesn't exist")
        );
    }

    #[test]
    fn input_errors_are_bad_requests() {
        let err = CarEndpoint::UpdateCar.error(DomainError::EmptyUpdate.into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().message(), Some("No data provided for update"));
    }

    #[test]
    fn rejected_prediction_propagates_status() {
        let err = CarEndpoint::PredictPrice
            .error(PredictionError::Rejected { status: 422 }.into());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body().message(), Some("Prediction failed."));
        assert!(err.body().error().is_none());
    }

    #[test]
    fn not_found_messages_follow_endpoint() {
        let not_found = || ApplicationError::Repository(RepositoryError::NotFound);
        assert_eq!(
            CarEndpoint::DeleteCar.error(not_found()).body().message(),
            Some("Car not found or already deleted")
        );
        assert_eq!(
            CarEndpoint::PredictPrice.error(not_found()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn generic_errors_serialize_without_message() {
        let body = serde_json::to_value(ApiError::internal().body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "An internal server error occurred." })
        );

        let not_found = ApiError::route_not_found();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert!(not_found.body().message().is_none());
    }
}
