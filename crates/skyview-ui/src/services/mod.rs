pub mod chrome_service;
pub mod weather_service;

pub use chrome_service::{schedule_acknowledgement_hide, ChromeServiceMessage};
pub use weather_service::{
    request_fetch_by_coordinates as request_weather_by_coordinates,
    request_fetch_by_name as request_weather_by_name, request_locate, WeatherError,
    WeatherServiceMessage,
};
