//! 仓储接口定义

pub mod car_repository;

pub use car_repository::CarRepository;
