//! 车辆实体

use std::fmt;

use serde::{Deserialize, Serialize};

use super::car_field::{CarField, FieldValue};
use super::payload::{CarPatch, NewCar};

/// 车辆主键，由数据库自增生成，分配后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(i64);

impl CarId {
    /// 解析路径参数；非整数的标识不可能匹配任何行
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok().map(Self)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for CarId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `cars_data` 表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub symboling: Option<i64>,
    pub normalized_losses: Option<i64>,
    pub make: String,
    pub fuel_type: Option<String>,
    pub aspiration: Option<String>,
    pub num_of_doors: Option<String>,
    pub body_style: Option<String>,
    pub drive_wheels: Option<String>,
    pub engine_location: Option<String>,
    pub wheel_base: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub curb_weight: Option<i64>,
    pub engine_type: Option<String>,
    pub num_of_cylinders: Option<String>,
    pub engine_size: Option<i64>,
    pub fuel_system: Option<String>,
    pub bore: Option<f64>,
    pub stroke: Option<f64>,
    pub compression_ratio: Option<f64>,
    pub horsepower: Option<i64>,
    pub peak_rpm: Option<i64>,
    pub city_mpg: Option<i64>,
    pub highway_mpg: Option<i64>,
    pub price: f64,
}

impl Car {
    /// 以新分配的主键组装一条记录
    pub fn from_new(id: CarId, new_car: &NewCar) -> Self {
        let mut car = Car {
            id,
            symboling: None,
            normalized_losses: None,
            make: new_car.make().to_string(),
            fuel_type: None,
            aspiration: None,
            num_of_doors: None,
            body_style: None,
            drive_wheels: None,
            engine_location: None,
            wheel_base: None,
            length: None,
            width: None,
            height: None,
            curb_weight: None,
            engine_type: None,
            num_of_cylinders: None,
            engine_size: None,
            fuel_system: None,
            bore: None,
            stroke: None,
            compression_ratio: None,
            horsepower: None,
            peak_rpm: None,
            city_mpg: None,
            highway_mpg: None,
            price: new_car.price(),
        };
        for field in CarField::ALL {
            car.set(field, &new_car.value(field));
        }
        car
    }

    /// 仅修改补丁中列出的字段
    pub fn apply_patch(&mut self, patch: &CarPatch) {
        for (field, value) in patch.changes() {
            self.set(*field, value);
        }
    }

    fn set(&mut self, field: CarField, value: &FieldValue) {
        let text = || value.as_text().map(str::to_string);
        match field {
            CarField::Symboling => self.symboling = value.as_integer(),
            CarField::NormalizedLosses => self.normalized_losses = value.as_integer(),
            CarField::Make => {
                if let Some(make) = value.as_text() {
                    self.make = make.to_string();
                }
            }
            CarField::FuelType => self.fuel_type = text(),
            CarField::Aspiration => self.aspiration = text(),
            CarField::NumOfDoors => self.num_of_doors = text(),
            CarField::BodyStyle => self.body_style = text(),
            CarField::DriveWheels => self.drive_wheels = text(),
            CarField::EngineLocation => self.engine_location = text(),
            CarField::WheelBase => self.wheel_base = value.as_float(),
            CarField::Length => self.length = value.as_float(),
            CarField::Width => self.width = value.as_float(),
            CarField::Height => self.height = value.as_float(),
            CarField::CurbWeight => self.curb_weight = value.as_integer(),
            CarField::EngineType => self.engine_type = text(),
            CarField::NumOfCylinders => self.num_of_cylinders = text(),
            CarField::EngineSize => self.engine_size = value.as_integer(),
            CarField::FuelSystem => self.fuel_system = text(),
            CarField::Bore => self.bore = value.as_float(),
            CarField::Stroke => self.stroke = value.as_float(),
            CarField::CompressionRatio => self.compression_ratio = value.as_float(),
            CarField::Horsepower => self.horsepower = value.as_integer(),
            CarField::PeakRpm => self.peak_rpm = value.as_integer(),
            CarField::CityMpg => self.city_mpg = value.as_integer(),
            CarField::HighwayMpg => self.highway_mpg = value.as_integer(),
            CarField::Price => {
                if let Some(price) = value.as_float() {
                    self.price = price;
                }
            }
        }
    }
}

/// 写操作的结果元数据，字段名与 MySQL 驱动的 ResultSetHeader 保持一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    pub affected_rows: u64,
    pub insert_id: u64,
}
