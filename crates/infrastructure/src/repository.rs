use async_trait::async_trait;
use domain::{
    Car, CarField, CarId, CarPatch, CarRepository, FieldValue, NewCar, RepositoryError,
    WriteOutcome,
};
use sqlx::{FromRow, MySql, QueryBuilder};

use crate::db::DbPool;

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::storage(err.to_string())
}

#[derive(Debug, FromRow)]
struct CarRecord {
    id: i64,
    symboling: Option<i64>,
    normalized_losses: Option<i64>,
    make: String,
    fuel_type: Option<String>,
    aspiration: Option<String>,
    num_of_doors: Option<String>,
    body_style: Option<String>,
    drive_wheels: Option<String>,
    engine_location: Option<String>,
    wheel_base: Option<f64>,
    length: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    curb_weight: Option<i64>,
    engine_type: Option<String>,
    num_of_cylinders: Option<String>,
    engine_size: Option<i64>,
    fuel_system: Option<String>,
    bore: Option<f64>,
    stroke: Option<f64>,
    compression_ratio: Option<f64>,
    horsepower: Option<i64>,
    peak_rpm: Option<i64>,
    city_mpg: Option<i64>,
    highway_mpg: Option<i64>,
    price: f64,
}

impl From<CarRecord> for Car {
    fn from(value: CarRecord) -> Self {
        Car {
            id: CarId::from(value.id),
            symboling: value.symboling,
            normalized_losses: value.normalized_losses,
            make: value.make,
            fuel_type: value.fuel_type,
            aspiration: value.aspiration,
            num_of_doors: value.num_of_doors,
            body_style: value.body_style,
            drive_wheels: value.drive_wheels,
            engine_location: value.engine_location,
            wheel_base: value.wheel_base,
            length: value.length,
            width: value.width,
            height: value.height,
            curb_weight: value.curb_weight,
            engine_type: value.engine_type,
            num_of_cylinders: value.num_of_cylinders,
            engine_size: value.engine_size,
            fuel_system: value.fuel_system,
            bore: value.bore,
            stroke: value.stroke,
            compression_ratio: value.compression_ratio,
            horsepower: value.horsepower,
            peak_rpm: value.peak_rpm,
            city_mpg: value.city_mpg,
            highway_mpg: value.highway_mpg,
            price: value.price,
        }
    }
}

const SELECT_CARS: &str = r#"
    SELECT id, symboling, normalized_losses, make, fuel_type, aspiration, num_of_doors,
           body_style, drive_wheels, engine_location, wheel_base, length, width, height,
           curb_weight, engine_type, num_of_cylinders, engine_size, fuel_system, bore, stroke,
           compression_ratio, horsepower, peak_rpm, city_mpg, highway_mpg, price
    FROM cars_data
"#;

// 列名只来自 CarField 白名单，值一律参数绑定
fn push_field_value(builder: &mut QueryBuilder<'_, MySql>, value: FieldValue) {
    match value {
        FieldValue::Integer(v) => builder.push_bind(v),
        FieldValue::Float(v) => builder.push_bind(v),
        FieldValue::Text(v) => builder.push_bind(v),
    };
}

/// MySQL 车辆仓储
#[derive(Clone)]
pub struct MySqlCarRepository {
    pool: DbPool,
}

impl MySqlCarRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: CarId) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM cars_data WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl CarRepository for MySqlCarRepository {
    async fn list(&self) -> Result<Vec<Car>, RepositoryError> {
        let records = sqlx::query_as::<_, CarRecord>(SELECT_CARS)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(records.into_iter().map(Car::from).collect())
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, RepositoryError> {
        let sql = format!("{SELECT_CARS} WHERE id = ?");
        let record = sqlx::query_as::<_, CarRecord>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(record.map(Car::from))
    }

    async fn insert(&self, car: &NewCar) -> Result<WriteOutcome, RepositoryError> {
        let columns = CarField::ALL.map(CarField::column).join(", ");
        let mut builder = QueryBuilder::<MySql>::new(format!("INSERT INTO cars_data ({columns}) VALUES ("));
        for (index, field) in CarField::ALL.into_iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            push_field_value(&mut builder, car.value(field));
        }
        builder.push(")");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(WriteOutcome {
            affected_rows: result.rows_affected(),
            insert_id: result.last_insert_id(),
        })
    }

    async fn update(&self, id: CarId, patch: &CarPatch) -> Result<WriteOutcome, RepositoryError> {
        let mut builder = QueryBuilder::<MySql>::new("UPDATE cars_data SET ");
        for (index, (field, value)) in patch.changes().iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(field.column()).push(" = ");
            push_field_value(&mut builder, value.clone());
        }
        builder.push(" WHERE id = ").push_bind(id.value());

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        // 行存在但值未变化时 MySQL 也可能报告 0 行受影响
        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(RepositoryError::NotFound);
        }

        Ok(WriteOutcome {
            affected_rows: result.rows_affected(),
            insert_id: result.last_insert_id(),
        })
    }

    async fn delete(&self, id: CarId) -> Result<WriteOutcome, RepositoryError> {
        let result = sqlx::query("DELETE FROM cars_data WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(WriteOutcome {
            affected_rows: result.rows_affected(),
            insert_id: 0,
        })
    }
}
