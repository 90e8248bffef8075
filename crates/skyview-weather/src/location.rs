use crate::types::{Coordinates, LocationError};

/// Host geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionSource {
    /// The host reports this position.
    Fixed(Coordinates),
    /// The host asks for permission and the user declines.
    Denied,
    /// The host has no geolocation at all.
    Unsupported,
}

impl PositionSource {
    /// Build from optional configured coordinates.
    pub fn from_settings(enabled: bool, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (enabled, latitude, longitude) {
            (false, _, _) => Self::Unsupported,
            (true, Some(lat), Some(lon)) => Self::Fixed(Coordinates::new(lat, lon)),
            (true, _, _) => Self::Denied,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// One-shot position query.
    pub async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self {
            Self::Fixed(coordinates) => Ok(*coordinates),
            Self::Denied => Err(LocationError::PermissionDenied),
            Self::Unsupported => Err(LocationError::ServiceUnavailable),
        }
    }
}
