//! Map view state: centre, fixed zoom, base tile layer and markers.
//!
//! A `MapView` only exists once initialised, so it cannot be recentred
//! before it has a tile layer and a centre.

use skyview_core::{MapConfig, MarkerPolicy};
use skyview_weather::Coordinates;

/// Base tile layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    /// Expand the `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub fn tile_url(&self, subdomain: char, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{s}", &subdomain.to_string())
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
}

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub marker_policy: MarkerPolicy,
}

impl MapOptions {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            center: Coordinates::new(config.default_latitude, config.default_longitude),
            zoom: config.zoom,
            tile_layer: TileLayer {
                url_template: config.tile_url_template.clone(),
                attribution: config.tile_attribution.clone(),
            },
            marker_policy: config.marker_policy,
        }
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

#[derive(Debug)]
pub struct MapView {
    center: Coordinates,
    zoom: u8,
    tile_layer: TileLayer,
    marker_policy: MarkerPolicy,
    markers: Vec<Marker>,
}

impl MapView {
    /// Create the view at `options.center` with its tile layer attached.
    pub fn initialize(options: MapOptions) -> Self {
        tracing::debug!(
            "Map initialized at {} (zoom {})",
            options.center,
            options.zoom
        );
        Self {
            center: options.center,
            zoom: options.zoom,
            tile_layer: options.tile_layer,
            marker_policy: options.marker_policy,
            markers: Vec::new(),
        }
    }

    /// Move the centre to `position` at the same zoom and drop a marker there.
    pub fn recenter(&mut self, position: Coordinates) {
        self.center = position;
        if self.marker_policy == MarkerPolicy::Replace {
            self.markers.clear();
        }
        self.markers.push(Marker { position });
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl std::fmt::Display for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "map centre {} zoom {} markers {} ({})",
            self.center,
            self.zoom,
            self.markers.len(),
            self.tile_layer.attribution
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_defaults() {
        let map = MapView::initialize(MapOptions::default());
        assert_eq!(map.center(), Coordinates::new(59.3293, 18.0686));
        assert_eq!(map.zoom(), 10);
        assert!(map.markers().is_empty());
        assert_eq!(map.tile_layer().attribution, "© OpenStreetMap");
    }

    #[test]
    fn test_recenter_accumulates_markers() {
        let mut map = MapView::initialize(MapOptions::default());
        let points = [
            Coordinates::new(55.605, 13.0038),
            Coordinates::new(57.7089, 11.9746),
            Coordinates::new(65.5848, 22.1567),
        ];
        for p in points {
            map.recenter(p);
        }

        assert_eq!(map.markers().len(), 3);
        assert_eq!(map.center(), points[2]);
        assert_eq!(map.zoom(), 10);
        assert_eq!(map.markers()[0].position, points[0]);
    }

    #[test]
    fn test_recenter_replace_policy_keeps_one_marker() {
        let options = MapOptions {
            marker_policy: MarkerPolicy::Replace,
            ..MapOptions::default()
        };
        let mut map = MapView::initialize(options);
        map.recenter(Coordinates::new(1.0, 1.0));
        map.recenter(Coordinates::new(2.0, 2.0));

        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.markers()[0].position, Coordinates::new(2.0, 2.0));
    }

    #[test]
    fn test_initialize_at_custom_center() {
        let options = MapOptions {
            center: Coordinates::new(63.8258, 20.263),
            ..MapOptions::default()
        };
        let map = MapView::initialize(options);
        assert_eq!(map.center(), Coordinates::new(63.8258, 20.263));
    }

    #[test]
    fn test_tile_url() {
        let map = MapView::initialize(MapOptions::default());
        assert_eq!(
            map.tile_layer().tile_url('b', 10, 562, 300),
            "https://b.tile.openstreetmap.org/10/562/300.png"
        );
    }

    #[test]
    fn test_display() {
        let mut map = MapView::initialize(MapOptions::default());
        map.recenter(Coordinates::new(59.0, 18.0));
        assert_eq!(
            map.to_string(),
            "map centre 59.0000, 18.0000 zoom 10 markers 1 (© OpenStreetMap)"
        );
    }
}
