//! Provider icon codes to Weather Icons CSS classes.

use serde::{Deserialize, Serialize};

/// Presentation class for a condition icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayClass {
    DaySunny,
    NightClear,
    DayCloudy,
    NightAltCloudy,
    Cloud,
    Cloudy,
    Showers,
    DayRain,
    NightAltRain,
    Thunderstorm,
    Snow,
    Fog,
    /// Icon code outside the known vocabulary
    Unavailable,
}

impl DisplayClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::DaySunny => "wi-day-sunny",
            Self::NightClear => "wi-night-clear",
            Self::DayCloudy => "wi-day-cloudy",
            Self::NightAltCloudy => "wi-night-alt-cloudy",
            Self::Cloud => "wi-cloud",
            Self::Cloudy => "wi-cloudy",
            Self::Showers => "wi-showers",
            Self::DayRain => "wi-day-rain",
            Self::NightAltRain => "wi-night-alt-rain",
            Self::Thunderstorm => "wi-thunderstorm",
            Self::Snow => "wi-snow",
            Self::Fog => "wi-fog",
            Self::Unavailable => "wi-na",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl std::fmt::Display for DisplayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Map a provider icon code (e.g. `"10n"`) to its display class.
/// Unknown codes map to [`DisplayClass::Unavailable`].
pub fn classify(icon_code: &str) -> DisplayClass {
    match icon_code {
        "01d" => DisplayClass::DaySunny,
        "01n" => DisplayClass::NightClear,
        "02d" => DisplayClass::DayCloudy,
        "02n" => DisplayClass::NightAltCloudy,
        "03d" | "03n" => DisplayClass::Cloud,
        "04d" | "04n" => DisplayClass::Cloudy,
        "09d" | "09n" => DisplayClass::Showers,
        "10d" => DisplayClass::DayRain,
        "10n" => DisplayClass::NightAltRain,
        "11d" | "11n" => DisplayClass::Thunderstorm,
        "13d" | "13n" => DisplayClass::Snow,
        "50d" | "50n" => DisplayClass::Fog,
        _ => DisplayClass::Unavailable,
    }
}
