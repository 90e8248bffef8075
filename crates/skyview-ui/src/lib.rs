//! Headless SkyView page: weather panel, map view and page chrome,
//! driven by a single page controller.

pub mod chrome;
pub mod display;
pub mod error_mapping;
pub mod map;
pub mod page;
pub mod services;

pub use chrome::{ContactFields, ContactForm, NavMenu};
pub use display::{PanelContent, WeatherCard, WeatherPanel};
pub use map::{MapOptions, MapView, Marker, TileLayer};
pub use page::{Page, PageMessage, PageOptions};
