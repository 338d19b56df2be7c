use std::sync::Arc;

use application::CarService;

#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
}

impl AppState {
    pub fn new(car_service: Arc<CarService>) -> Self {
        Self { car_service }
    }
}
