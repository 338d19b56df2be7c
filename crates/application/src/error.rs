use domain::{DomainError, PredictionError, RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("prediction error: {0}")]
    Prediction(#[from] PredictionError),
}

impl ApplicationError {
    /// 没有匹配的车辆记录
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApplicationError::Repository(RepositoryError::NotFound))
    }
}
