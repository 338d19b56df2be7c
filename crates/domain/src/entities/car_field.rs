//! 可写字段白名单
//!
//! `cars_data` 中除 `id` 外的 26 列。创建与更新请求的键都必须经过
//! [`CarField`] 映射到列名，SQL 中拼接的列名只来自这里。

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::errors::DomainError;

/// 列的存储类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "number",
            FieldKind::Text => "string",
        };
        f.write_str(name)
    }
}

/// 可写列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarField {
    Symboling,
    NormalizedLosses,
    Make,
    FuelType,
    Aspiration,
    NumOfDoors,
    BodyStyle,
    DriveWheels,
    EngineLocation,
    WheelBase,
    Length,
    Width,
    Height,
    CurbWeight,
    EngineType,
    NumOfCylinders,
    EngineSize,
    FuelSystem,
    Bore,
    Stroke,
    CompressionRatio,
    Horsepower,
    PeakRpm,
    CityMpg,
    HighwayMpg,
    Price,
}

impl CarField {
    /// 按表中列顺序排列，INSERT 语句依赖该顺序
    pub const ALL: [CarField; 26] = [
        CarField::Symboling,
        CarField::NormalizedLosses,
        CarField::Make,
        CarField::FuelType,
        CarField::Aspiration,
        CarField::NumOfDoors,
        CarField::BodyStyle,
        CarField::DriveWheels,
        CarField::EngineLocation,
        CarField::WheelBase,
        CarField::Length,
        CarField::Width,
        CarField::Height,
        CarField::CurbWeight,
        CarField::EngineType,
        CarField::NumOfCylinders,
        CarField::EngineSize,
        CarField::FuelSystem,
        CarField::Bore,
        CarField::Stroke,
        CarField::CompressionRatio,
        CarField::Horsepower,
        CarField::PeakRpm,
        CarField::CityMpg,
        CarField::HighwayMpg,
        CarField::Price,
    ];

    pub fn column(self) -> &'static str {
        match self {
            CarField::Symboling => "symboling",
            CarField::NormalizedLosses => "normalized_losses",
            CarField::Make => "make",
            CarField::FuelType => "fuel_type",
            CarField::Aspiration => "aspiration",
            CarField::NumOfDoors => "num_of_doors",
            CarField::BodyStyle => "body_style",
            CarField::DriveWheels => "drive_wheels",
            CarField::EngineLocation => "engine_location",
            CarField::WheelBase => "wheel_base",
            CarField::Length => "length",
            CarField::Width => "width",
            CarField::Height => "height",
            CarField::CurbWeight => "curb_weight",
            CarField::EngineType => "engine_type",
            CarField::NumOfCylinders => "num_of_cylinders",
            CarField::EngineSize => "engine_size",
            CarField::FuelSystem => "fuel_system",
            CarField::Bore => "bore",
            CarField::Stroke => "stroke",
            CarField::CompressionRatio => "compression_ratio",
            CarField::Horsepower => "horsepower",
            CarField::PeakRpm => "peak_rpm",
            CarField::CityMpg => "city_mpg",
            CarField::HighwayMpg => "highway_mpg",
            CarField::Price => "price",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            CarField::Symboling
            | CarField::NormalizedLosses
            | CarField::CurbWeight
            | CarField::EngineSize
            | CarField::Horsepower
            | CarField::PeakRpm
            | CarField::CityMpg
            | CarField::HighwayMpg => FieldKind::Integer,
            CarField::WheelBase
            | CarField::Length
            | CarField::Width
            | CarField::Height
            | CarField::Bore
            | CarField::Stroke
            | CarField::CompressionRatio
            | CarField::Price => FieldKind::Float,
            CarField::Make
            | CarField::FuelType
            | CarField::Aspiration
            | CarField::NumOfDoors
            | CarField::BodyStyle
            | CarField::DriveWheels
            | CarField::EngineLocation
            | CarField::EngineType
            | CarField::NumOfCylinders
            | CarField::FuelSystem => FieldKind::Text,
        }
    }

    /// `make` 和 `price` 为 NOT NULL 列
    pub fn is_nullable(self) -> bool {
        !matches!(self, CarField::Make | CarField::Price)
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == name)
    }

    /// 将 JSON 值转换为该列可绑定的值
    pub fn coerce(self, value: &Value) -> Result<FieldValue, DomainError> {
        if value.is_null() {
            if self.is_nullable() {
                return Ok(FieldValue::null(self.kind()));
            }
            return Err(DomainError::invalid_field_value(
                self.column(),
                "must not be null",
            ));
        }

        let coerced = match self.kind() {
            FieldKind::Integer => integer_from_json(value).map(|v| FieldValue::Integer(Some(v))),
            FieldKind::Float => float_from_json(value).map(|v| FieldValue::Float(Some(v))),
            FieldKind::Text => text_from_json(value).map(|v| FieldValue::Text(Some(v))),
        };

        coerced.ok_or_else(|| {
            DomainError::invalid_field_value(self.column(), format!("expected {}", self.kind()))
        })
    }
}

impl fmt::Display for CarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for CarField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column(s).ok_or_else(|| DomainError::unknown_field(s))
    }
}

/// 已按列类型转换的绑定值，`None` 表示 SQL NULL
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(Option<i64>),
    Float(Option<f64>),
    Text(Option<String>),
}

impl FieldValue {
    pub fn null(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Integer => FieldValue::Integer(None),
            FieldKind::Float => FieldValue::Float(None),
            FieldKind::Text => FieldValue::Text(None),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => *v,
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => *v,
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => v.as_deref(),
            _ => None,
        }
    }
}

fn integer_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn float_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn text_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
