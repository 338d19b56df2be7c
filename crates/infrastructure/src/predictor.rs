//! 价格预测服务 HTTP 客户端
//!
//! 预测服务需要接受 `POST {base_url}/predict/{id}`，成功时返回包含数值型
//! `predicted_price` 字段的 JSON。客户端不设置超时，也不重试。

use async_trait::async_trait;
use domain::{CarId, PredictionError, PricePredictor};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    predicted_price: f64,
}

#[derive(Debug, Clone)]
pub struct HttpPricePredictor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPricePredictor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, car_id: CarId) -> String {
        format!("{}/predict/{}", self.base_url.trim_end_matches('/'), car_id)
    }
}

#[async_trait]
impl PricePredictor for HttpPricePredictor {
    async fn predict(&self, car_id: CarId, features: Value) -> Result<f64, PredictionError> {
        let url = self.endpoint(car_id);
        tracing::debug!(%url, "forwarding features to prediction service");

        let response = self
            .client
            .post(&url)
            .json(&features)
            .send()
            .await
            .map_err(|err| PredictionError::Transport(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%url, status = status.as_u16(), "prediction service rejected request");
            return Err(PredictionError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: PredictionResponse = response
            .json()
            .await
            .map_err(|err| PredictionError::InvalidResponse(err.to_string()))?;

        Ok(body.predicted_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_car_id_once() {
        let predictor = HttpPricePredictor::new("http://127.0.0.1:5000/");
        assert_eq!(
            predictor.endpoint(CarId::from(12)),
            "http://127.0.0.1:5000/predict/12"
        );
    }
}
