//! 领域实体

pub mod car;
pub mod car_field;
pub mod payload;

pub use car::{Car, CarId, WriteOutcome};
pub use car_field::{CarField, FieldKind, FieldValue};
pub use payload::{CarPatch, NewCar};
