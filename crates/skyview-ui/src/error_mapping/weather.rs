use crate::services::weather_service::WeatherError as UiWeatherError;
use skyview_core::{AppError, WeatherError};
use skyview_weather::{FetchError, LocationError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Fetch(FetchError::NameLookup) => {
                AppError::Weather(WeatherError::LocationNotFound(e.to_string()))
            }
            UiWeatherError::Fetch(FetchError::CoordinateLookup) => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            UiWeatherError::NotInitialized => AppError::Weather(WeatherError::ServiceUnavailable),
        }
    }
}

/// Local wrapper so the host error can be mapped without owning either type.
#[derive(Debug)]
pub struct PositionFailure(pub LocationError);

impl From<PositionFailure> for AppError {
    fn from(PositionFailure(e): PositionFailure) -> Self {
        AppError::Weather(WeatherError::PositionUnavailable(e.to_string()))
    }
}
