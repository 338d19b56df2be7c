//! 领域模型错误定义
//!
//! 输入错误、仓储错误和预测服务错误分别建模，由 Web 层映射为 HTTP 状态码。

use thiserror::Error;

/// 领域模型错误类型（全部属于调用方输入错误，在任何 I/O 之前检出）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 创建车辆时缺少必填字段
    #[error("Missing required fields: make or price")]
    MissingRequiredFields,

    /// 更新请求体为空
    #[error("No data provided for update")]
    EmptyUpdate,

    /// 字段不在可写白名单中
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    /// 字段值无法表示为该列的类型
    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },

    /// 请求体不是 JSON 对象
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },
}

impl DomainError {
    /// 创建未知字段错误
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// 创建字段值错误
    pub fn invalid_field_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 创建载荷错误
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;

/// 仓储错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    /// 底层驱动错误，`message` 保留驱动原始错误文本
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// 价格预测服务错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// 预测服务返回了非 200 状态码
    #[error("prediction service responded with status {status}")]
    Rejected { status: u16 },
    #[error("prediction service request failed: {0}")]
    Transport(String),
    /// 200 响应中缺少数值型 `predicted_price`
    #[error("invalid prediction response: {0}")]
    InvalidResponse(String),
}
