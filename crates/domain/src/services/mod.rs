//! 外部服务接口定义

pub mod price_predictor;

pub use price_predictor::PricePredictor;

#[cfg(feature = "testing")]
pub use price_predictor::MockPricePredictor;
