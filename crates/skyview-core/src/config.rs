use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "SKYVIEW_WEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,

    /// Page behaviour
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the current-weather API (without the `/weather` path)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Access credential for the provider. `SKYVIEW_WEATHER_API_KEY` wins over this.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Unit system passed to the provider
    #[serde(default = "default_units")]
    pub units: String,

    /// Response language tag passed to the provider
    #[serde(default = "default_language")]
    pub language: String,

    /// Transport timeout for a single request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_language() -> String {
    "sv".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            units: default_units(),
            language: default_language(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// The API key to use: environment first, then the config file.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

/// Whether a new marker replaces the previous ones or is added next to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    #[default]
    Accumulate,
    Replace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Fallback centre latitude used when the page loads
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    /// Fallback centre longitude used when the page loads
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    /// Zoom level, fixed for the lifetime of the view
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Base tile layer URL template (`{s}`, `{z}`, `{x}`, `{y}`)
    #[serde(default = "default_tile_url_template")]
    pub tile_url_template: String,

    /// Attribution text shown with the tile layer
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,

    #[serde(default)]
    pub marker_policy: MarkerPolicy,
}

fn default_latitude() -> f64 {
    59.3293
}

fn default_longitude() -> f64 {
    18.0686
}

fn default_zoom() -> u8 {
    10
}

fn default_tile_url_template() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_tile_attribution() -> String {
    "© OpenStreetMap".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            zoom: default_zoom(),
            tile_url_template: default_tile_url_template(),
            tile_attribution: default_tile_attribution(),
            marker_policy: MarkerPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// How long the contact acknowledgement stays visible
    #[serde(default = "default_acknowledgement_secs")]
    pub acknowledgement_secs: u64,

    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

fn default_acknowledgement_secs() -> u64 {
    5
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            acknowledgement_secs: default_acknowledgement_secs(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

/// Host geolocation capability.
///
/// `enabled = false` behaves like a host without geolocation. When enabled
/// without a position, the lookup is treated as a declined permission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyview");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            map: MapConfig::default(),
            page: PageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;

        config.config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);

        if self.weather.effective_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured (set {} or weather.api_key)", API_KEY_ENV),
            );
        }

        if self.weather.units.trim().is_empty() {
            result.add_error("weather.units", "Unit system must not be empty");
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        }

        validate_coordinates(
            self.map.default_latitude,
            self.map.default_longitude,
            "map",
            &mut result,
        );

        if self.map.zoom > 19 {
            result.add_error("map.zoom", "Zoom level must be between 0 and 19");
        }

        if !self.map.tile_url_template.contains("{z}") {
            result.add_warning(
                "map.tile_url_template",
                "Tile URL template has no {z} placeholder",
            );
        }

        if self.page.acknowledgement_secs == 0 {
            result.add_warning(
                "page.acknowledgement_secs",
                "Contact acknowledgement will be hidden immediately",
            );
        }

        let geo = &self.page.geolocation;
        match (geo.latitude, geo.longitude) {
            (Some(lat), Some(lon)) => {
                validate_coordinates(lat, lon, "page.geolocation", &mut result)
            }
            (None, None) => {}
            _ => result.add_error(
                "page.geolocation",
                "latitude and longitude must be set together",
            ),
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyview");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_coordinates(lat: f64, lon: f64, section: &str, result: &mut ValidationResult) {
    if !(-90.0..=90.0).contains(&lat) {
        result.add_error(
            format!("{}.latitude", section),
            format!("Latitude out of range: {}", lat),
        );
    }
    if !(-180.0..=180.0).contains(&lon) {
        result.add_error(
            format!("{}.longitude", section),
            format!("Longitude out of range: {}", lon),
        );
    }
}
