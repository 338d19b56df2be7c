//! 创建与更新请求载荷
//!
//! 载荷在进入仓储之前完成解析：创建请求校验必填字段，更新请求按白名单
//! 将键映射为列。两者都只能通过 `from_json` 构造。

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::car_field::{CarField, FieldValue};
use crate::errors::{DomainError, DomainResult};

/// 已校验的新车辆数据（`make` 与 `price` 必然存在）
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    values: BTreeMap<CarField, FieldValue>,
}

impl NewCar {
    /// 非列名的键（包括 `id`）在创建时被忽略
    pub fn from_json(payload: &Value) -> DomainResult<Self> {
        let object = as_object(payload)?;

        let present = |field: CarField| object.get(field.column()).is_some_and(is_truthy);
        if !present(CarField::Make) || !present(CarField::Price) {
            return Err(DomainError::MissingRequiredFields);
        }

        let mut values = BTreeMap::new();
        for field in CarField::ALL {
            if let Some(value) = object.get(field.column()) {
                values.insert(field, field.coerce(value)?);
            }
        }

        Ok(Self { values })
    }

    /// 未提供的字段返回对应类型的 NULL
    pub fn value(&self, field: CarField) -> FieldValue {
        self.values
            .get(&field)
            .cloned()
            .unwrap_or_else(|| FieldValue::null(field.kind()))
    }

    pub fn make(&self) -> &str {
        self.values
            .get(&CarField::Make)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    pub fn price(&self) -> f64 {
        self.values
            .get(&CarField::Price)
            .and_then(FieldValue::as_float)
            .unwrap_or_default()
    }
}

/// 部分更新：非空的（列, 值）列表
#[derive(Debug, Clone, PartialEq)]
pub struct CarPatch {
    changes: Vec<(CarField, FieldValue)>,
}

impl CarPatch {
    /// 空对象返回 [`DomainError::EmptyUpdate`]，白名单外的键返回 [`DomainError::UnknownField`]
    pub fn from_json(payload: &Value) -> DomainResult<Self> {
        let object = as_object(payload)?;
        if object.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }

        let changes = object
            .iter()
            .map(|(key, value)| {
                let field: CarField = key.parse()?;
                Ok((field, field.coerce(value)?))
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self { changes })
    }

    /// 只修改价格列，用于预测结果回写
    pub fn price(price: f64) -> Self {
        Self {
            changes: vec![(CarField::Price, FieldValue::Float(Some(price)))],
        }
    }

    pub fn changes(&self) -> &[(CarField, FieldValue)] {
        &self.changes
    }
}

fn as_object(payload: &Value) -> DomainResult<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| DomainError::invalid_payload("request body must be a JSON object"))
}

// 必填检查沿用 JavaScript 的真值语义：空字符串与 0 视为缺失
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
