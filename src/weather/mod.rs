pub mod codes;
pub mod handlers;
pub mod models;
pub mod service;

pub use models::WeatherResult;
pub use service::WeatherService;
