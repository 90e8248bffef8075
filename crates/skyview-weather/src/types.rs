use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::icon::{classify, DisplayClass};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A free-text place name, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct PlaceName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("place name must not be blank")]
pub struct BlankPlaceName;

impl PlaceName {
    /// Trim the input; blank input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaceName {
    type Error = BlankPlaceName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(BlankPlaceName)
    }
}

impl std::fmt::Display for PlaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a lookup is keyed by.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Named(PlaceName),
    Coordinates(Coordinates),
}

impl Location {
    pub fn lookup_kind(&self) -> LookupKind {
        match self {
            Location::Named(_) => LookupKind::Name,
            Location::Coordinates(_) => LookupKind::Coordinates,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Name,
    Coordinates,
}

/// Current conditions for one place, built from a successful provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub place_name: String,
    /// Degrees Celsius, rounded to one decimal
    pub temperature: f64,
    pub description: String,
    pub icon_code: String,
    pub coordinates: Coordinates,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReading {
    /// Temperature as shown on the page, e.g. `7.0°C`.
    pub fn temperature_label(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    pub fn display_class(&self) -> DisplayClass {
        classify(&self.icon_code)
    }
}

/// Round to one decimal place.
///
/// Goes through the decimal formatter, so the stored binary value decides:
/// `1.45` is really `1.4499..` and rounds down.
pub(crate) fn round_tenths(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Host geolocation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
}

/// Weather lookup failure.
///
/// Transport errors, error statuses and malformed bodies all collapse into
/// this one error; only the lookup kind decides the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("location not found")]
    NameLookup,
    #[error("could not retrieve weather for your location")]
    CoordinateLookup,
}

impl FetchError {
    pub fn for_lookup(kind: LookupKind) -> Self {
        match kind {
            LookupKind::Name => Self::NameLookup,
            LookupKind::Coordinates => Self::CoordinateLookup,
        }
    }
}
