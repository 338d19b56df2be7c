mod car_service;

#[cfg(test)]
mod car_service_tests;

pub use car_service::{CarService, CarServiceDependencies};
