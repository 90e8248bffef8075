//! Weather lookups for SkyView.
//!
//! Fetches current conditions by place name or coordinates, and maps
//! provider icon codes to display classes.

pub mod icon;
pub mod location;
pub mod provider;
pub mod types;

pub use icon::{classify, DisplayClass};
pub use location::PositionSource;
pub use provider::{ProviderSettings, WeatherProvider, DEFAULT_BASE_URL};
pub use types::*;
