//! Current-weather client for an OpenWeatherMap-style `/weather` endpoint.

use crate::types::{
    round_tenths, Coordinates, FetchError, Location, PlaceName, WeatherReading,
};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Everything needed to build request URLs.
#[derive(Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub units: String,
    pub language: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Metric units, Swedish descriptions, 10 second timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            units: "metric".to_string(),
            language: "sv".to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("units", &self.units)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    coord: Option<CoordBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CoordBlock {
    lat: f64,
    lon: f64,
}

/// Why a lookup failed. Only logged; callers see [`FetchError`].
#[derive(Debug, thiserror::Error)]
enum LookupFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    settings: ProviderSettings,
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            settings,
        })
    }

    /// Current weather for a place name.
    pub async fn fetch_by_name(&self, place: &PlaceName) -> Result<WeatherReading, FetchError> {
        self.fetch(&Location::Named(place.clone())).await
    }

    /// Current weather at a coordinate pair.
    pub async fn fetch_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherReading, FetchError> {
        self.fetch(&Location::Coordinates(coordinates)).await
    }

    /// Single GET, no retry. Every failure collapses into the lookup's `FetchError`.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, location: &Location) -> Result<WeatherReading, FetchError> {
        match self.request(location).await {
            Ok(reading) => {
                tracing::debug!(
                    "Fetched weather for {} ({})",
                    reading.place_name,
                    reading.coordinates
                );
                Ok(reading)
            }
            Err(failure) => {
                tracing::debug!("Weather lookup failed: {}", failure);
                Err(FetchError::for_lookup(location.lookup_kind()))
            }
        }
    }

    async fn request(&self, location: &Location) -> Result<WeatherReading, LookupFailure> {
        let url = format!("{}/weather", self.settings.base_url.trim_end_matches('/'));

        let mut query: Vec<(&str, String)> = match location {
            Location::Named(place) => vec![("q", place.as_str().to_string())],
            Location::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        };
        query.push(("units", self.settings.units.clone()));
        query.push(("lang", self.settings.language.clone()));
        query.push(("appid", self.settings.api_key.clone()));

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status));
        }

        let body = response.text().await?;
        let parsed: CurrentWeatherResponse = serde_json::from_str(&body)
            .map_err(|e| LookupFailure::Malformed(e.to_string()))?;

        let coordinates = match location {
            // Recentre on what was asked for, not on the provider's station.
            Location::Coordinates(c) => *c,
            Location::Named(_) => parsed
                .coord
                .as_ref()
                .map(|c| Coordinates::new(c.lat, c.lon))
                .ok_or_else(|| LookupFailure::Malformed("missing coord".to_string()))?,
        };

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| LookupFailure::Malformed("empty weather list".to_string()))?;

        Ok(WeatherReading {
            place_name: parsed.name,
            temperature: round_tenths(parsed.main.temp),
            description: condition.description,
            icon_code: condition.icon,
            coordinates,
            fetched_at: Utc::now(),
        })
    }
}
